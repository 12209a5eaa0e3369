use crate::error::ApiError;
use crate::handlers::page::{self, RouteMode};
use crate::handlers::RequestContext;
use crate::routes::names;
use axum::response::Response;

/// Evil outcome: route finder in longest-route mode
pub fn evil(ctx: &RequestContext<'_>) -> Result<Response, ApiError> {
    page::trace(ctx, "evil");

    let body = format!(
        "<h1>Evil</h1>\n{}\n<p>{}</p>",
        page::route_finder(ctx, RouteMode::Longest),
        page::link(ctx, names::CHOICE, "Choose again")?,
    );
    page::render(ctx, "Evil", &body)
}
