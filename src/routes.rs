// Route path constants - single source of truth for all paths

use crate::handlers;
use crate::route_table::{Route, RouteTable, RoutingError};

pub const HEALTH: &str = "/health";
pub const STATIC: &str = "/static";
/// Client script the route-finder pages load from the static directory.
pub const ROUTE_FINDER_SCRIPT: &str = "scripts/hoghackproject.js";

// Page patterns, relative to the mount prefix
pub const HOME: &str = "/";
pub const CHOICE: &str = "choice/";
pub const EVIL: &str = "choice/evil";
pub const GOOD: &str = "choice/good";

/// Symbolic route names used for reverse lookup.
pub mod names {
    pub const HOME: &str = "home";
    pub const CHOICE: &str = "choice";
    pub const EVIL: &str = "evil";
    pub const GOOD: &str = "good";
}

/// Builds the page route table. Order matters: the first match wins.
pub fn urlpatterns() -> Result<RouteTable, RoutingError> {
    RouteTable::new(vec![
        Route::new(HOME, handlers::home, names::HOME)?,
        Route::new(CHOICE, handlers::choice, names::CHOICE)?,
        Route::new(EVIL, handlers::evil, names::EVIL)?,
        Route::new(GOOD, handlers::good, names::GOOD)?,
    ])
}
