//! The middleware pipeline micro-router plugs into.
//!
//! A request is processed by an ordered chain of [`Middleware`]s. Each one receives the
//! [`Context`] of the request and a [`Next`] continuation representing the rest of the chain,
//! and may run code both before and after it.
//!
//! This crate does not listen on sockets: a server turns its `http::Request` into a
//! [`Context`] and writes back the [`Response`] the chain produced.
//!
//! # Example
//!
//! ```
//! use micro_web::{Pipeline, middleware_fn};
//! use http::StatusCode;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let pipeline = Pipeline::builder()
//!     .add_last(middleware_fn(|_ctx, _next| Box::pin(async move { Ok(Some("Hi, world!".into())) })))
//!     .build();
//!
//! let request = http::Request::builder().uri("/").body(()).unwrap();
//! let response = pipeline.dispatch(request).await;
//! assert_eq!(response.status(), StatusCode::OK);
//! # }
//! ```

mod body;
mod context;
mod error;
mod middleware;
mod pipeline;
mod request;
mod response;

pub mod method;

pub use body::ResponseBody;
pub use context::Context;
pub use error::BoxError;
pub use error::HttpError;
pub use middleware::BoxMiddleware;
pub use middleware::FnMiddleware;
pub use middleware::Middleware;
pub use middleware::MiddlewareResult;
pub use middleware::Next;
pub use middleware::middleware_fn;
pub use pipeline::Pipeline;
pub use pipeline::PipelineBuilder;
pub use request::Request;
pub use request::Slugs;
pub use response::Response;
