use crate::context::Context;
use crate::error::HttpError;
use crate::middleware::{BoxMiddleware, Middleware, MiddlewareResult, Next};
use crate::request::Request;
use crate::response::Response;
use http::StatusCode;
use std::fmt;
use std::sync::Arc;
use tracing::{error, trace};

/// An ordered middleware chain, run front to back for every request.
pub struct Pipeline {
    chain: Vec<BoxMiddleware>,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Runs the chain on `ctx`.
    ///
    /// A value returned by the chain becomes the response body, and turns a `404` status into
    /// `200`. Errors are returned untouched.
    pub async fn handle(&self, ctx: &mut Context) -> MiddlewareResult {
        let result = Next::new(&self.chain).run(ctx).await?;
        if let Some(body) = &result {
            trace!(path = ctx.req().path(), "chain returned a body");
            if ctx.res().status() == StatusCode::NOT_FOUND {
                ctx.res_mut().set_status(StatusCode::OK);
            }
            ctx.res_mut().set_body(body.clone());
        }
        Ok(result)
    }

    /// Runs the chain for `request` and always produces a response: an [`HttpError`] is
    /// rendered with its own status, any other error as `500 Internal Server Error`.
    pub async fn dispatch(&self, request: impl Into<Request>) -> Response {
        let mut ctx = Context::new(request);
        match self.handle(&mut ctx).await {
            Ok(_) => ctx.into_response(),
            Err(e) => match e.downcast::<HttpError>() {
                Ok(http_error) => render_http_error(&http_error),
                Err(e) => {
                    error!(cause = %e, method = %ctx.req().method(), path = ctx.req().path(), "middleware failed");
                    render_http_error(&HttpError::new(StatusCode::INTERNAL_SERVER_ERROR))
                }
            },
        }
    }
}

fn render_http_error(http_error: &HttpError) -> Response {
    let mut response = Response::new();
    response.set_status(http_error.status());
    response.headers_mut().extend(http_error.headers().clone());
    response.set_body(http_error.message().to_owned());
    response
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("middlewares", &self.chain.len()).finish()
    }
}

#[derive(Default)]
pub struct PipelineBuilder {
    chain: Vec<BoxMiddleware>,
}

impl PipelineBuilder {
    fn new() -> Self {
        Self { chain: vec![] }
    }

    pub fn add_last<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.chain.push(Arc::new(middleware));
        self
    }

    pub fn add_first<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.chain.insert(0, Arc::new(middleware));
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline { chain: self.chain }
    }
}

impl fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineBuilder").field("middlewares", &self.chain.len()).finish()
    }
}
