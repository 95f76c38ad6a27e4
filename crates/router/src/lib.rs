//! A regex based path router for the [`micro_web`] middleware pipeline.
//!
//! Routes are registered on a [`Router`] with a path template and handled by any
//! [`Middleware`](micro_web::Middleware). [`Router::routes`] produces the middleware that
//! dispatches requests, and [`Router::allowed_methods`] the middleware answering `405`, `501`
//! and `OPTIONS` for paths that exist under other methods.
//!
//! Between several matching routes, a route whose template equals the request path wins,
//! then the route with the longest template.
//!
//! # Example
//!
//! ```
//! use micro_router::{AllowedMethodsOptions, Router};
//! use micro_web::{Pipeline, middleware_fn};
//! use http::{Method, StatusCode};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), micro_router::RouterError> {
//! let mut router = Router::new();
//! router
//!     .get("/", middleware_fn(|_ctx, _next| Box::pin(async move { Ok(Some("Hi, world!".into())) })))?
//!     .delete(
//!         "/users/:id",
//!         middleware_fn(|ctx, _next| {
//!             Box::pin(async move { Ok(ctx.req().slugs().get("id").map(|id| format!("deleted {id}").into())) })
//!         }),
//!     )?;
//!
//! let pipeline = Pipeline::builder()
//!     .add_last(router.routes())
//!     .add_last(router.allowed_methods(AllowedMethodsOptions::default()))
//!     .build();
//!
//! let request = http::Request::builder().method(Method::DELETE).uri("/users/42").body(()).unwrap();
//! let response = pipeline.dispatch(request).await;
//! assert_eq!(response.body().as_bytes(), b"deleted 42");
//!
//! let request = http::Request::builder().method(Method::POST).uri("/users/42").body(()).unwrap();
//! let response = pipeline.dispatch(request).await;
//! assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
//! # Ok(())
//! # }
//! ```

mod allowed;
mod controller;
mod error;
mod matcher;
mod methods;
mod pattern;
mod route;
mod router;

pub use allowed::AllowedMethods;
pub use allowed::AllowedMethodsOptions;
pub use allowed::ErrorFactory;
pub use controller::Controller;
pub use controller::parse_controllers;
pub use error::PatternError;
pub use error::RouterError;
pub use matcher::RouteMatch;
pub use matcher::allowed_methods_for;
pub use matcher::match_route;
pub use methods::IntoMethodSet;
pub use methods::MethodSet;
pub use pattern::PathPattern;
pub use route::Route;
pub use route::RouteTable;
pub use router::MatchedRoute;
pub use router::PathMethods;
pub use router::Router;
pub use router::RouterOptions;
pub use router::Routes;
