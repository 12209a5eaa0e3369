use crate::error::ApiError;
use crate::handlers::RequestContext;
use crate::routes::{self, names};
use axum::response::{Html, IntoResponse, Response};

/// Wraps a page body in the shared layout.
pub fn render(ctx: &RequestContext<'_>, title: &str, body: &str) -> Result<Response, ApiError> {
    let home = ctx.url_for(names::HOME)?;
    let html = format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n\
         <header><a href=\"{home}\">Home</a></header>\n\
         <main>\n{body}\n</main>\n\
         </body>\n\
         </html>\n"
    );
    Ok(Html(html).into_response())
}

pub fn link(ctx: &RequestContext<'_>, name: &str, label: &str) -> Result<String, ApiError> {
    Ok(format!("<a href=\"{}\">{}</a>", ctx.url_for(name)?, label))
}

/// Which route the client-side finder asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
    Fastest,
    Longest,
}

impl RouteMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteMode::Fastest => "fastest",
            RouteMode::Longest => "longest",
        }
    }
}

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Markup for the map-based route finder driven by the client script.
///
/// The script builds its map on load and exposes a global `route(type)`,
/// so Leaflet has to come first and the button calls `route` directly.
pub fn route_finder(ctx: &RequestContext<'_>, mode: RouteMode) -> String {
    let scripts = ctx
        .static_url(routes::ROUTE_FINDER_SCRIPT)
        .map(|src| {
            format!(
                "\n<link rel=\"stylesheet\" href=\"{LEAFLET_CSS}\">\n\
                 <script src=\"{LEAFLET_JS}\"></script>\n\
                 <script src=\"{src}\"></script>"
            )
        })
        .unwrap_or_default();

    format!(
        "<section id=\"route-finder\" data-route-mode=\"{mode}\">\n\
         <input id=\"start\" placeholder=\"Start (blank for current location)\">\n\
         <input id=\"end\" placeholder=\"Destination\">\n\
         <button type=\"button\" onclick=\"route('{mode}')\">Find the {mode} route</button>\n\
         <div id=\"map\" style=\"height: 400px\"></div>\n\
         <div id=\"instructions\"></div>\n\
         <ol id=\"directions-list\"></ol>\n\
         </section>{scripts}",
        mode = mode.as_str(),
    )
}

pub fn trace(ctx: &RequestContext<'_>, page: &str) {
    tracing::debug!(
        request_id = %ctx.request_id,
        method = %ctx.method,
        path = ctx.path,
        params = ?ctx.params,
        "Rendering {} page",
        page
    );
}
