//! Answers requests no route handled with `405 Method Not Allowed`, `501 Not Implemented` or
//! the `Allow` header of an `OPTIONS` request.
//!
//! It must run after the middleware of [`Router::routes`](crate::Router::routes) was given the
//! request, usually right after it in the chain.

use crate::methods::MethodSet;
use crate::router::{MatchedRoute, PathMethods};
use async_trait::async_trait;
use http::{Method, StatusCode, header};
use micro_web::{BoxError, Context, HttpError, Middleware, MiddlewareResult, Next, ResponseBody};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builds the error raised instead of a `405` or `501` response in throw mode
pub type ErrorFactory = Arc<dyn Fn() -> BoxError + Send + Sync>;

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AllowedMethodsOptions {
    /// The methods the application implements, every known method when unset
    pub methods: Option<MethodSet>,
    /// Return an error instead of writing the `405`/`501` response
    pub throw: bool,
    /// Used for both `405` and `501` in throw mode, instead of an [`HttpError`]
    #[serde(skip)]
    pub not_implemented: Option<ErrorFactory>,
}

impl AllowedMethodsOptions {
    #[must_use]
    pub fn with_not_implemented<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> BoxError + Send + Sync + 'static,
    {
        self.not_implemented = Some(Arc::new(factory));
        self
    }
}

impl fmt::Debug for AllowedMethodsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllowedMethodsOptions")
            .field("methods", &self.methods)
            .field("throw", &self.throw)
            .field("not_implemented", &self.not_implemented.is_some())
            .finish()
    }
}

#[derive(Clone)]
pub struct AllowedMethods {
    implemented: MethodSet,
    throw: bool,
    not_implemented: Option<ErrorFactory>,
}

impl Default for AllowedMethods {
    fn default() -> Self {
        Self::new(AllowedMethodsOptions::default())
    }
}

impl AllowedMethods {
    pub fn new(options: AllowedMethodsOptions) -> Self {
        Self {
            implemented: options.methods.unwrap_or_else(MethodSet::all),
            throw: options.throw,
            not_implemented: options.not_implemented,
        }
    }

    pub fn implemented(&self) -> MethodSet {
        self.implemented
    }

    fn error(&self, fallback: HttpError) -> BoxError {
        match &self.not_implemented {
            Some(factory) => factory(),
            None => fallback.into(),
        }
    }

    fn respond(ctx: &mut Context, status: StatusCode, allow: MethodSet) -> Result<(), BoxError> {
        ctx.res_mut().set_status(status);
        ctx.res_mut().set(header::ALLOW, allow.names())?;
        Ok(())
    }
}

impl fmt::Debug for AllowedMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllowedMethods")
            .field("implemented", &self.implemented)
            .field("throw", &self.throw)
            .field("not_implemented", &self.not_implemented.is_some())
            .finish()
    }
}

#[async_trait]
impl Middleware for AllowedMethods {
    async fn call(&self, ctx: &mut Context, next: Next<'_>) -> MiddlewareResult {
        let result = next.run(ctx).await?;
        if result.is_some() || ctx.res().status() != StatusCode::NOT_FOUND {
            return Ok(result);
        }

        let allowed = ctx
            .state()
            .get::<MatchedRoute>()
            .map(|matched| matched.methods)
            .or_else(|| ctx.state().get::<PathMethods>().map(|path_methods| path_methods.0))
            .unwrap_or_default();
        let method = ctx.req().method().clone();

        if !self.implemented.contains(&method) {
            debug!(method = %method, path = ctx.req().path(), "method not implemented");
            if self.throw {
                return Err(self.error(HttpError::not_implemented()));
            }
            Self::respond(ctx, StatusCode::NOT_IMPLEMENTED, allowed)?;
            return Ok(None);
        }

        if allowed.is_empty() {
            return Ok(None);
        }

        if method == Method::OPTIONS {
            debug!(path = ctx.req().path(), allow = %allowed, "answer OPTIONS");
            Self::respond(ctx, StatusCode::OK, allowed)?;
            ctx.res_mut().set_body(ResponseBody::empty());
            return Ok(None);
        }

        if !allowed.contains(&method) {
            debug!(method = %method, path = ctx.req().path(), allow = %allowed, "method not allowed");
            if self.throw {
                let error = HttpError::method_not_allowed().with_header(header::ALLOW, allowed.to_header_value());
                return Err(self.error(error));
            }
            Self::respond(ctx, StatusCode::METHOD_NOT_ALLOWED, allowed)?;
        }

        Ok(None)
    }
}
