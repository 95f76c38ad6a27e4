//! Routes declared as controller actions keyed by `"METHOD /path"`.
//!
//! ```
//! use micro_router::{Controller, Router};
//! use micro_web::middleware_fn;
//!
//! # fn main() -> Result<(), micro_router::RouterError> {
//! let users = Controller::new()
//!     .action("GET /users", middleware_fn(|_ctx, _next| Box::pin(async move { Ok(Some("[]".into())) })))
//!     .action("PUT|PATCH /users/:id", middleware_fn(|_ctx, _next| Box::pin(async move { Ok(None) })));
//!
//! let mut router = Router::new();
//! router.controllers([users])?;
//! assert_eq!(router.table().len(), 2);
//! # Ok(())
//! # }
//! ```

use crate::error::RouterError;
use crate::methods::MethodSet;
use crate::pattern::PathPattern;
use crate::route::Route;
use micro_web::{BoxMiddleware, Middleware};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// An ordered set of actions, each keyed by `"METHOD /path"`.
///
/// `METHOD` may list several methods separated by `|` and is case insensitive. A key made of
/// a path only is answered for `GET`.
#[derive(Default, Clone)]
pub struct Controller {
    actions: Vec<(String, BoxMiddleware)>,
}

impl Controller {
    pub fn new() -> Self {
        Self { actions: vec![] }
    }

    #[must_use]
    pub fn action<M: Middleware + 'static>(mut self, key: impl Into<String>, handler: M) -> Self {
        self.actions.push((key.into(), Arc::new(handler)));
        self
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.actions.iter().map(|(key, _)| key)).finish()
    }
}

/// Turns controller actions into routes, in declaration order.
///
/// A key without a method falls back to `GET` and a path without a leading `/` is skipped,
/// both with a warning. A missing path or an unknown method fails the whole setup.
pub fn parse_controllers(controllers: impl IntoIterator<Item = Controller>) -> Result<Vec<Route<BoxMiddleware>>, RouterError> {
    let mut routes = vec![];

    for controller in controllers {
        for (key, handler) in controller.actions {
            let mut parts = key.split(' ');
            let first = parts.next().unwrap_or_default();
            let (method, path) = match parts.next() {
                Some(path) => (first, path),
                None => {
                    warn!(path = first, "implicit method is not recommended, resolved as GET");
                    ("GET", first)
                }
            };

            if path.is_empty() {
                return Err(RouterError::missing_path(&key));
            }

            let methods = MethodSet::parse(method)?;
            if !path.starts_with('/') {
                warn!(key = %key, "path must start with \"/\", action skipped");
                continue;
            }

            let pattern = PathPattern::compile(path)?;
            debug!(methods = %methods, path = path, "register controller action");
            routes.push(Route::new(pattern, methods, handler));
        }
    }

    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::{Controller, parse_controllers};
    use crate::{Route, RouterError};
    use http::Method;
    use micro_web::{Middleware, middleware_fn};

    fn noop() -> impl Middleware {
        middleware_fn(|_ctx, _next| Box::pin(async move { Ok(None) }))
    }

    fn summary(routes: &[Route<micro_web::BoxMiddleware>]) -> Vec<(Vec<&'static str>, &str)> {
        routes.iter().map(|route| (route.methods().names(), route.raw())).collect()
    }

    #[test]
    fn test_parse_keys() {
        let users = Controller::new()
            .action("GET /users", noop())
            .action("put|Patch /users/:id", noop())
            .action("/about", noop());
        let files = Controller::new().action("HEAD /files/**", noop());

        let routes = parse_controllers([users, files]).unwrap();
        assert_eq!(
            summary(&routes),
            vec![
                (vec!["GET"], "/users"),
                (vec!["PUT", "PATCH"], "/users/:id"),
                (vec!["GET"], "/about"),
                (vec!["HEAD"], "/files/**"),
            ]
        );
        assert!(routes[1].allows(&Method::PATCH));
    }

    #[test]
    fn test_path_without_slash_is_skipped() {
        let controller = Controller::new().action("GET users", noop()).action("GET", noop()).action("POST /users", noop());
        let routes = parse_controllers([controller]).unwrap();
        assert_eq!(summary(&routes), vec![(vec!["POST"], "/users")]);
    }

    #[test]
    fn test_missing_path() {
        let controller = Controller::new().action("", noop());
        assert!(matches!(parse_controllers([controller]), Err(RouterError::MissingPath { .. })));

        let controller = Controller::new().action("GET ", noop());
        assert!(matches!(parse_controllers([controller]), Err(RouterError::MissingPath { .. })));
    }

    #[test]
    fn test_unsupported_method() {
        let controller = Controller::new().action("GET /ok", noop()).action("GET|FETCH /users", noop());
        let error = parse_controllers([controller]).err().unwrap();
        assert_eq!(error.to_string(), "unsupported method \"FETCH\"");
    }

    #[test]
    fn test_invalid_pattern() {
        let controller = Controller::new().action("GET /files/***", noop());
        assert!(matches!(parse_controllers([controller]), Err(RouterError::Pattern { .. })));
    }

    #[test]
    fn test_prefix_is_not_applied() {
        let mut router = crate::Router::with_prefix("/api");
        router.get("/a", noop()).unwrap();
        router.controllers([Controller::new().action("GET /b", noop())]).unwrap();

        let paths = router.table().iter().map(Route::raw).collect::<Vec<_>>();
        assert_eq!(paths, ["/api/a", "/b"]);
    }
}
