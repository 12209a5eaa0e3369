pub mod choice;
pub mod evil;
pub mod good;
pub mod health;
pub mod home;
mod page;

pub use choice::choice;
pub use evil::evil;
pub use good::good;
pub use health::health_handler;
pub use home::home;

use crate::error::ApiError;
use crate::route_table::{PathParams, RouteTable, RoutingError};
use axum::{http::Method, response::Response};
use uuid::Uuid;

/// Signature shared by every page handler in the route table.
pub type Handler = fn(&RequestContext<'_>) -> Result<Response, ApiError>;

/// Everything a page handler gets to see about the request it serves.
pub struct RequestContext<'a> {
    pub request_id: Uuid,
    pub method: &'a Method,
    /// Path relative to the mount prefix.
    pub path: &'a str,
    pub params: &'a PathParams,
    pub routes: &'a RouteTable,
    pub mount_prefix: &'a str,
    pub static_enabled: bool,
}

impl RequestContext<'_> {
    /// Absolute URL of the named route under the mount prefix.
    pub fn url_for(&self, name: &str) -> Result<String, RoutingError> {
        let path = self.routes.reverse(name)?;
        Ok(format!(
            "{}{}",
            self.mount_prefix,
            path.strip_prefix('/').unwrap_or(&path)
        ))
    }

    pub fn static_url(&self, file: &str) -> Option<String> {
        self.static_enabled
            .then(|| format!("{}/{}", crate::routes::STATIC, file))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Fixture;

    #[test]
    fn test_url_for_under_root() {
        let fixture = Fixture::new();
        let ctx = fixture.context("", "/");
        assert_eq!(ctx.url_for("home").unwrap(), "/");
        assert_eq!(ctx.url_for("choice").unwrap(), "/choice/");
        assert_eq!(ctx.url_for("evil").unwrap(), "/choice/evil");
    }

    #[test]
    fn test_url_for_under_prefix() {
        let fixture = Fixture::new();
        let ctx = fixture.context("", "/page/");
        assert_eq!(ctx.url_for("home").unwrap(), "/page/");
        assert_eq!(ctx.url_for("good").unwrap(), "/page/choice/good");
    }

    #[test]
    fn test_url_for_unknown_name() {
        let fixture = Fixture::new();
        let ctx = fixture.context("", "/");
        assert!(ctx.url_for("missing-name").is_err());
    }

    #[test]
    fn test_static_url_requires_static_dir() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context("", "/");
        assert_eq!(ctx.static_url("scripts/app.js"), None);
        ctx.static_enabled = true;
        assert_eq!(
            ctx.static_url("scripts/app.js").as_deref(),
            Some("/static/scripts/app.js")
        );
    }
}
