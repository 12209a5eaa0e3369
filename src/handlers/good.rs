use crate::error::ApiError;
use crate::handlers::page::{self, RouteMode};
use crate::handlers::RequestContext;
use crate::routes::names;
use axum::response::Response;

/// Good outcome: route finder in fastest-route mode
pub fn good(ctx: &RequestContext<'_>) -> Result<Response, ApiError> {
    page::trace(ctx, "good");

    let body = format!(
        "<h1>Good</h1>\n{}\n<p>{}</p>",
        page::route_finder(ctx, RouteMode::Fastest),
        page::link(ctx, names::CHOICE, "Choose again")?,
    );
    page::render(ctx, "Good", &body)
}
