use crate::body::ResponseBody;
use crate::context::Context;
use crate::error::BoxError;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// What a middleware hands back to its caller: `Some(body)` when it produced a value for the
/// response, `None` when it only worked on the context.
pub type MiddlewareResult = Result<Option<ResponseBody>, BoxError>;

pub type BoxMiddleware = Arc<dyn Middleware>;

/// A unit of request processing.
///
/// It receives the request context and the rest of the chain as [`Next`], and may run code
/// both before and after running it. Route handlers are middlewares too.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn call(&self, ctx: &mut Context, next: Next<'_>) -> MiddlewareResult;
}

#[async_trait]
impl<M: Middleware + ?Sized> Middleware for Arc<M> {
    async fn call(&self, ctx: &mut Context, next: Next<'_>) -> MiddlewareResult {
        self.as_ref().call(ctx, next).await
    }
}

/// The rest of the chain after the running middleware.
#[derive(Clone, Copy)]
pub struct Next<'chain> {
    chain: &'chain [BoxMiddleware],
}

impl<'chain> Next<'chain> {
    pub fn new(chain: &'chain [BoxMiddleware]) -> Self {
        Self { chain }
    }

    /// A continuation with nothing left to run
    pub fn end() -> Next<'static> {
        Next { chain: &[] }
    }

    /// Runs the remaining middlewares; an exhausted chain returns `Ok(None)`
    pub async fn run(self, ctx: &mut Context) -> MiddlewareResult {
        match self.chain.split_first() {
            Some((current, rest)) => current.call(ctx, Next::new(rest)).await,
            None => Ok(None),
        }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.chain.len()
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").field("remaining", &self.chain.len()).finish()
    }
}

/// a `Fn` holder which represents a middleware written as a closure
pub struct FnMiddleware<F> {
    f: F,
}

/// Creates a middleware from a closure returning a boxed future.
///
/// # Example
/// ```
/// use micro_web::middleware_fn;
///
/// let hello = middleware_fn(|_ctx, _next| Box::pin(async move { Ok(Some("Hi, world!".into())) }));
/// # let _ = hello;
/// ```
pub fn middleware_fn<F>(f: F) -> FnMiddleware<F>
where
    F: for<'a> Fn(&'a mut Context, Next<'a>) -> BoxFuture<'a, MiddlewareResult> + Send + Sync,
{
    FnMiddleware { f }
}

#[async_trait]
impl<F> Middleware for FnMiddleware<F>
where
    F: for<'a> Fn(&'a mut Context, Next<'a>) -> BoxFuture<'a, MiddlewareResult> + Send + Sync,
{
    async fn call(&self, ctx: &mut Context, next: Next<'_>) -> MiddlewareResult {
        (self.f)(ctx, next).await
    }
}

impl<F> fmt::Debug for FnMiddleware<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnMiddleware")
    }
}

#[cfg(test)]
mod tests {
    use super::{BoxMiddleware, Middleware, MiddlewareResult, Next, middleware_fn};
    use crate::Context;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Middleware for Counting {
        async fn call(&self, ctx: &mut Context, next: Next<'_>) -> MiddlewareResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            next.run(ctx).await
        }
    }

    fn context() -> Context {
        Context::new(http::Request::builder().uri("/").body(()).unwrap())
    }

    fn assert_is_middleware<M: Middleware>(_m: &M) {
        // no op
    }

    #[test]
    fn assert_fn_is_middleware() {
        let m = middleware_fn(|ctx, next| Box::pin(async move { next.run(ctx).await }));
        assert_is_middleware(&m);
    }

    #[tokio::test]
    async fn test_end_of_chain() {
        let mut ctx = context();
        assert!(Next::end().run(&mut ctx).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_chain_runs_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain: Vec<BoxMiddleware> = vec![
            Arc::new(Counting { calls: Arc::clone(&calls) }),
            Arc::new(Counting { calls: Arc::clone(&calls) }),
            Arc::new(middleware_fn(|_ctx, next| {
                Box::pin(async move {
                    assert_eq!(next.remaining(), 0);
                    Ok(Some("done".into()))
                })
            })),
        ];

        let mut ctx = context();
        let result = Next::new(&chain).run(&mut ctx).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(result.unwrap().as_bytes(), b"done");
    }

    #[tokio::test]
    async fn test_short_circuit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain: Vec<BoxMiddleware> = vec![
            Arc::new(middleware_fn(|_ctx, _next| Box::pin(async move { Ok(None) }))),
            Arc::new(Counting { calls: Arc::clone(&calls) }),
        ];

        let mut ctx = context();
        Next::new(&chain).run(&mut ctx).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
