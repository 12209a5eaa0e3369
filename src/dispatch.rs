use crate::error::ApiError;
use crate::handlers::{self, RequestContext};
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the axum application: health check, optional static files, and
/// the page route table behind a fallback dispatcher.
pub fn app(state: AppState) -> Router {
    let mut router: Router<AppState> =
        Router::new().route(routes::HEALTH, get(handlers::health_handler));

    if let Some(dir) = &state.config.static_dir {
        if !dir.is_dir() {
            tracing::warn!("Static directory {} does not exist", dir.display());
        } else if !dir.join(routes::ROUTE_FINDER_SCRIPT).is_file() {
            tracing::warn!(
                "Static directory {} has no {}; route-finder pages will not work",
                dir.display(),
                routes::ROUTE_FINDER_SCRIPT
            );
        }
        router = router.nest_service(routes::STATIC, ServeDir::new(dir));
    }

    router
        .fallback(dispatch)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Fallback handler - resolves the path through the route table
pub async fn dispatch(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let request_id = Uuid::new_v4();

    let mut response = match handle(&state, &method, uri.path(), request_id) {
        Ok(response) => response,
        Err(err) => {
            tracing::info!(%request_id, "{} {} -> {:?}", method, uri.path(), err);
            err.into_response()
        }
    };

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn handle(
    state: &AppState,
    method: &Method,
    path: &str,
    request_id: Uuid,
) -> Result<Response, ApiError> {
    let not_found = || ApiError::NotFound(path.to_string());

    // The mount prefix already ends in `/`; a second slash is never a page.
    let relative = path
        .strip_prefix(state.config.mount_prefix.as_str())
        .filter(|rest| !rest.starts_with('/'))
        .ok_or_else(not_found)?;
    let resolved = state.routes.resolve(relative).map_err(|_| not_found())?;

    tracing::info!(%request_id, "{} {} -> {}", method, path, resolved.route.name);

    let ctx = RequestContext {
        request_id,
        method,
        path: relative,
        params: &resolved.params,
        routes: &state.routes,
        mount_prefix: &state.config.mount_prefix,
        static_enabled: state.config.static_dir.is_some(),
    };
    (resolved.route.handler)(&ctx)
}
