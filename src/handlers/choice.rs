use crate::error::ApiError;
use crate::handlers::page;
use crate::handlers::RequestContext;
use crate::routes::names;
use axum::response::Response;

/// Selection page offering both outcomes
pub fn choice(ctx: &RequestContext<'_>) -> Result<Response, ApiError> {
    page::trace(ctx, "choice");

    let body = format!(
        "<h1>Choose your path</h1>\n<ul>\n<li>{}</li>\n<li>{}</li>\n</ul>",
        page::link(ctx, names::GOOD, "Good: the fastest way there")?,
        page::link(ctx, names::EVIL, "Evil: the longest way there")?,
    );
    page::render(ctx, "Choice", &body)
}
