use crate::error::ApiError;
use crate::handlers::page;
use crate::handlers::RequestContext;
use crate::routes::names;
use axum::response::Response;

/// Entry page
pub fn home(ctx: &RequestContext<'_>) -> Result<Response, ApiError> {
    page::trace(ctx, "home");

    let body = format!(
        "<h1>Where to?</h1>\n<p>{}</p>",
        page::link(ctx, names::CHOICE, "Make your choice")?
    );
    page::render(ctx, "Home", &body)
}
