use std::collections::HashMap;
use std::fmt;

use crate::handlers::Handler;

/// Errors raised while building the route table or looking routes up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    #[error("No route matches path: '{0}'")]
    NotFound(String),
    #[error("Unknown route name: '{0}'")]
    UnknownRouteName(String),
    #[error("Route name '{0}' is declared more than once")]
    DuplicateRouteName(String),
    #[error("Pattern '{0}' is declared more than once")]
    DuplicatePattern(String),
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("Route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },
    #[error("Route '{route}' has no parameter '{param}'")]
    UnexpectedParam { route: String, param: String },
    #[error("Invalid value for parameter '{param}': '{value}'")]
    InvalidParam { param: String, value: String },
}

/// Parameters captured from placeholder segments during resolution.
pub type PathParams = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route pattern.
///
/// Patterns are relative to the mount point and never start with `/`, except
/// for `/` itself, which denotes the root. A trailing `/` is part of the
/// pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn parse(raw: &str) -> Result<Self, RoutingError> {
        let invalid = |reason: &str| RoutingError::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw != "/" && raw.starts_with('/') {
            return Err(invalid("only the root pattern may start with '/'"));
        }

        let mut segments = Vec::new();
        for part in root_as_empty(raw).split('/') {
            let opens = part.matches('{').count();
            let closes = part.matches('}').count();
            if opens == 0 && closes == 0 {
                segments.push(Segment::Literal(part.to_string()));
                continue;
            }
            if opens != closes {
                return Err(invalid("unbalanced braces"));
            }
            if opens > 1 {
                return Err(invalid("a segment may hold only one placeholder"));
            }
            let name = part
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
                .ok_or_else(|| invalid("a placeholder must span the whole segment"))?;
            if name.is_empty() {
                return Err(invalid("empty placeholder name"));
            }
            if segments.contains(&Segment::Param(name.to_string())) {
                return Err(invalid(&format!("placeholder '{}' appears twice", name)));
            }
            segments.push(Segment::Param(name.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Exact, segment-by-segment match against a mount-relative path.
    /// Returns the captured parameters.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }

    fn render(&self, route: &str, params: &PathParams) -> Result<String, RoutingError> {
        for key in params.keys() {
            if !self.param_names().any(|name| name == key.as_str()) {
                return Err(RoutingError::UnexpectedParam {
                    route: route.to_string(),
                    param: key.clone(),
                });
            }
        }

        let mut rendered = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => rendered.push(literal.as_str()),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| RoutingError::MissingParam {
                        route: route.to_string(),
                        param: name.clone(),
                    })?;
                    if value.is_empty() || value.contains(['/', '?', '#']) {
                        return Err(RoutingError::InvalidParam {
                            param: name.clone(),
                            value: value.clone(),
                        });
                    }
                    rendered.push(value.as_str());
                }
            }
        }

        let path = rendered.join("/");
        if self.raw.starts_with('/') {
            Ok(format!("/{}", path))
        } else {
            Ok(path)
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn root_as_empty(path: &str) -> &str {
    if path == "/" { "" } else { path }
}

/// A binding from a path pattern to a handler under a symbolic name.
#[derive(Clone)]
pub struct Route {
    pub pattern: Pattern,
    pub handler: Handler,
    pub name: String,
}

impl Route {
    pub fn new(pattern: &str, handler: Handler, name: &str) -> Result<Self, RoutingError> {
        Ok(Self {
            pattern: Pattern::parse(pattern)?,
            handler,
            name: name.to_string(),
        })
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Result of a successful [`RouteTable::resolve`].
#[derive(Debug)]
pub struct Resolved<'a> {
    pub route: &'a Route,
    pub params: PathParams,
}

/// Ordered, immutable route table with a name index for reverse lookup.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Result<Self, RoutingError> {
        let mut by_name = HashMap::with_capacity(routes.len());
        for (index, route) in routes.iter().enumerate() {
            if routes[..index]
                .iter()
                .any(|r| r.pattern.segments == route.pattern.segments)
            {
                return Err(RoutingError::DuplicatePattern(route.pattern.to_string()));
            }
            if by_name.insert(route.name.clone(), index).is_some() {
                return Err(RoutingError::DuplicateRouteName(route.name.clone()));
            }
        }
        Ok(Self { routes, by_name })
    }

    /// First route in declaration order whose pattern matches `path`.
    ///
    /// `path` is mount-relative. `/` and the empty path both name the root;
    /// any other leading `/` is treated literally and will not match.
    pub fn resolve(&self, path: &str) -> Result<Resolved<'_>, RoutingError> {
        let relative = root_as_empty(path);
        self.routes
            .iter()
            .find_map(|route| {
                route
                    .pattern
                    .matches(relative)
                    .map(|params| Resolved { route, params })
            })
            .ok_or_else(|| RoutingError::NotFound(path.to_string()))
    }

    pub fn reverse(&self, name: &str) -> Result<String, RoutingError> {
        self.reverse_with(name, &PathParams::new())
    }

    pub fn reverse_with(&self, name: &str, params: &PathParams) -> Result<String, RoutingError> {
        let route = self.get(name)?;
        route.pattern.render(&route.name, params)
    }

    pub fn get(&self, name: &str) -> Result<&Route, RoutingError> {
        self.by_name
            .get(name)
            .map(|&index| &self.routes[index])
            .ok_or_else(|| RoutingError::UnknownRouteName(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn log_startup(&self) {
        tracing::info!("Route table loaded ({} routes):", self.routes.len());
        for route in self.iter() {
            tracing::info!("  {:<12} -> {}", route.pattern.as_str(), route.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::handlers::RequestContext;
    use axum::response::{IntoResponse, Response};

    fn noop(_ctx: &RequestContext<'_>) -> Result<Response, ApiError> {
        Ok(().into_response())
    }

    fn table(entries: &[(&str, &str)]) -> Result<RouteTable, RoutingError> {
        let routes = entries
            .iter()
            .map(|(pattern, name)| Route::new(pattern, noop, name))
            .collect::<Result<Vec<_>, _>>()?;
        RouteTable::new(routes)
    }

    fn params(pairs: &[(&str, &str)]) -> PathParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_literal_match_is_exact() {
        let pattern = Pattern::parse("choice/").unwrap();
        assert!(pattern.matches("choice/").is_some());
        assert!(pattern.matches("/choice/").is_none());
        assert!(pattern.matches("choice//").is_none());
        assert!(pattern.matches("choice").is_none());
        assert!(pattern.matches("choice/evil").is_none());
    }

    #[test]
    fn test_root_pattern() {
        let table = table(&[("/", "root"), ("a/", "a")]).unwrap();
        assert_eq!(table.resolve("/").unwrap().route.name, "root");
        assert_eq!(table.resolve("").unwrap().route.name, "root");
        assert!(table.resolve("//").is_err());
        assert!(table.resolve("/a/").is_err());
        assert_eq!(table.reverse("root").unwrap(), "/");
    }

    #[test]
    fn test_extra_slashes_do_not_match() {
        let table = table(&[("choice/", "choice"), ("choice/{side}", "side")]).unwrap();
        for path in ["/choice/", "//choice/", "choice//", "/choice/evil", "choice//evil"] {
            assert!(table.resolve(path).is_err(), "expected '{}' to miss", path);
        }
    }

    #[test]
    fn test_placeholder_captures_segment() {
        let pattern = Pattern::parse("users/{id}/posts/{post}").unwrap();
        let captured = pattern.matches("users/42/posts/7").unwrap();
        assert_eq!(captured, params(&[("id", "42"), ("post", "7")]));
        assert!(pattern.matches("users//posts/7").is_none());
        assert!(pattern.matches("users/42/posts").is_none());
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["id", "post"]);
    }

    #[test]
    fn test_invalid_patterns() {
        for raw in [
            "users/{id",
            "users/id}",
            "users/{}",
            "users/x{id}",
            "a/{id}/{id}",
            "/users/{id}",
        ] {
            let result = Pattern::parse(raw);
            assert!(
                matches!(result, Err(RoutingError::InvalidPattern { .. })),
                "expected '{}' to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_two_placeholders_in_one_segment() {
        let err = Pattern::parse("users/{a}{b}").unwrap_err();
        assert!(err.to_string().contains("only one placeholder"), "{}", err);

        let err = Pattern::parse("users/{a").unwrap_err();
        assert!(err.to_string().contains("unbalanced braces"), "{}", err);
    }

    #[test]
    fn test_first_match_wins() {
        let table = table(&[("items/{slug}", "item"), ("items/new", "new")]).unwrap();
        let resolved = table.resolve("items/new").unwrap();
        assert_eq!(resolved.route.name, "item");
        assert_eq!(resolved.params, params(&[("slug", "new")]));
    }

    #[test]
    fn test_resolve_not_found() {
        let table = table(&[("a/", "a")]).unwrap();
        assert_eq!(
            table.resolve("b/").unwrap_err(),
            RoutingError::NotFound("b/".to_string())
        );
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = table(&[("a/", "same"), ("b/", "same")]);
        assert_eq!(
            result.unwrap_err(),
            RoutingError::DuplicateRouteName("same".to_string())
        );
    }

    #[test]
    fn test_duplicate_pattern_rejected() {
        let result = table(&[("a/", "first"), ("a/", "second")]);
        assert!(matches!(result, Err(RoutingError::DuplicatePattern(_))));
    }

    #[test]
    fn test_reverse_with_params() {
        let table = table(&[("users/{id}/", "user")]).unwrap();
        let path = table.reverse_with("user", &params(&[("id", "42")])).unwrap();
        assert_eq!(path, "users/42/");
    }

    #[test]
    fn test_reverse_param_errors() {
        let table = table(&[("users/{id}", "user"), ("about", "about")]).unwrap();

        assert_eq!(
            table.reverse("user").unwrap_err(),
            RoutingError::MissingParam {
                route: "user".to_string(),
                param: "id".to_string()
            }
        );
        assert!(matches!(
            table.reverse_with("about", &params(&[("id", "1")])),
            Err(RoutingError::UnexpectedParam { .. })
        ));
        for bad in ["", "a/b", "a?b", "a#b"] {
            assert!(matches!(
                table.reverse_with("user", &params(&[("id", bad)])),
                Err(RoutingError::InvalidParam { .. })
            ));
        }
    }

    #[test]
    fn test_reverse_round_trips_through_resolve() {
        let table = table(&[("users/{id}", "user")]).unwrap();
        let path = table.reverse_with("user", &params(&[("id", "abc")])).unwrap();
        let resolved = table.resolve(&path).unwrap();
        assert_eq!(resolved.route.name, "user");
        assert_eq!(resolved.params, params(&[("id", "abc")]));
    }
}
