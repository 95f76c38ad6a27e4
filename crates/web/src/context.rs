use crate::request::Request;
use crate::response::Response;
use http::Extensions;

/// Everything a middleware works on for one request: the request head, the response being
/// built, and a per-request state bag shared by the whole chain.
///
/// A context is created per request and never shared between requests.
#[derive(Debug)]
pub struct Context {
    req: Request,
    res: Response,
    state: Extensions,
}

impl Context {
    pub fn new(req: impl Into<Request>) -> Self {
        Self { req: req.into(), res: Response::new(), state: Extensions::new() }
    }

    pub fn req(&self) -> &Request {
        &self.req
    }

    pub fn req_mut(&mut self) -> &mut Request {
        &mut self.req
    }

    pub fn res(&self) -> &Response {
        &self.res
    }

    pub fn res_mut(&mut self) -> &mut Response {
        &mut self.res
    }

    /// Per-request state, keyed by type
    pub fn state(&self) -> &Extensions {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut Extensions {
        &mut self.state
    }

    pub fn into_response(self) -> Response {
        self.res
    }
}

#[cfg(test)]
mod tests {
    use super::Context;
    use http::{Method, StatusCode};

    #[derive(Debug, Clone, PartialEq)]
    struct Visited(&'static str);

    #[test]
    fn test_state_bag() {
        let mut ctx = Context::new(http::Request::builder().method(Method::GET).uri("/").body(()).unwrap());
        assert!(ctx.state().get::<Visited>().is_none());

        ctx.state_mut().insert(Visited("router"));
        assert_eq!(ctx.state().get::<Visited>(), Some(&Visited("router")));
        assert_eq!(ctx.res().status(), StatusCode::NOT_FOUND);
    }
}
