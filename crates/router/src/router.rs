use crate::allowed::{AllowedMethods, AllowedMethodsOptions};
use crate::controller::{Controller, parse_controllers};
use crate::error::RouterError;
use crate::matcher::{allowed_methods_for, match_route};
use crate::methods::{IntoMethodSet, MethodSet};
use crate::pattern::PathPattern;
use crate::route::{Route, RouteTable};
use async_trait::async_trait;
use http::{Method, StatusCode};
use micro_web::{BoxMiddleware, Context, Middleware, MiddlewareResult, Next, Slugs};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Router construction options, usually read from the application configuration.
///
/// ```
/// use micro_router::RouterOptions;
///
/// let options: RouterOptions = serde_json::from_str(r#"{ "prefix": "/api", "methods": ["GET", "POST"] }"#).unwrap();
/// assert_eq!(options.prefix, "/api");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    /// Prepended to every path registered afterwards
    pub prefix: String,
    /// The methods the application implements, see [`Router::allowed_methods`]
    pub methods: Option<MethodSet>,
}

/// Route registration and the middleware that dispatches to the registered routes.
///
/// # Example
/// ```
/// use micro_router::Router;
/// use micro_web::middleware_fn;
///
/// # fn main() -> Result<(), micro_router::RouterError> {
/// let mut router = Router::new();
/// router
///     .get("/", middleware_fn(|_ctx, _next| Box::pin(async move { Ok(Some("Hi, world!".into())) })))?
///     .put(
///         "/{id}",
///         middleware_fn(|ctx, _next| {
///             Box::pin(async move { Ok(ctx.req().slugs().get("id").map(|id| id.to_owned().into())) })
///         }),
///     )?;
///
/// let routes = router.routes();
/// # let _ = routes;
/// # Ok(())
/// # }
/// ```
pub struct Router {
    table: RouteTable<BoxMiddleware>,
    prefix: String,
    methods: Option<MethodSet>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! method_route {
    ($method:ident, $upper_case_method:ident) => {
        #[doc = concat!("Registers `handler` for HTTP ", stringify!($upper_case_method), " requests on `path`.")]
        pub fn $method<M: Middleware + 'static>(&mut self, path: &str, handler: M) -> Result<&mut Self, RouterError> {
            self.add_route(Method::$upper_case_method, path, handler)
        }
    };
}

impl Router {
    pub fn new() -> Self {
        Self { table: RouteTable::new(), prefix: String::new(), methods: None }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), ..Self::new() }
    }

    pub fn with_options(options: RouterOptions) -> Self {
        Self { table: RouteTable::new(), prefix: options.prefix, methods: options.methods }
    }

    /// Replaces the prefix for the routes registered from now on; routes already registered
    /// keep theirs.
    pub fn prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.prefix = prefix.into();
        self
    }

    /// The prefix applied to the next registration
    pub fn current_prefix(&self) -> &str {
        &self.prefix
    }

    /// Registers `handler` for `methods` on the current prefix followed by `path`.
    ///
    /// The prefix is concatenated as is, so the result must start with `/`.
    pub fn add_route<M>(&mut self, methods: impl IntoMethodSet, path: &str, handler: M) -> Result<&mut Self, RouterError>
    where
        M: Middleware + 'static,
    {
        let template = format!("{}{}", self.prefix, path);
        let methods = methods.into_method_set()?;
        if methods.is_empty() {
            return Err(RouterError::empty_methods(template));
        }
        let pattern = PathPattern::compile(&template)?;

        debug!(methods = %methods, path = %template, "register route");
        self.table.push(Route::new(pattern, methods, Arc::new(handler)));
        Ok(self)
    }

    method_route!(get, GET);
    method_route!(head, HEAD);
    method_route!(post, POST);
    method_route!(put, PUT);
    method_route!(delete, DELETE);
    method_route!(options, OPTIONS);
    method_route!(patch, PATCH);

    /// Registers the actions of `controllers`, see [`parse_controllers`]. The prefix is not
    /// applied to them.
    pub fn controllers(&mut self, controllers: impl IntoIterator<Item = Controller>) -> Result<&mut Self, RouterError> {
        let routes = parse_controllers(controllers)?;
        self.table.extend(routes);
        Ok(self)
    }

    /// Moves the routes of `other` after the routes of this router
    pub fn append(&mut self, mut other: Router) -> &mut Self {
        self.table.append(&mut other.table);
        self
    }

    /// Combines routers built independently: a single router is returned as is, otherwise the
    /// result holds the routes of all of them, in order.
    pub fn merge(routers: impl IntoIterator<Item = Router>) -> Router {
        let mut routers = routers.into_iter().collect::<Vec<_>>();
        if routers.len() == 1
            && let Some(router) = routers.pop()
        {
            return router;
        }

        routers.into_iter().fold(Router::new(), |mut merged, router| {
            merged.append(router);
            merged
        })
    }

    pub fn table(&self) -> &RouteTable<BoxMiddleware> {
        &self.table
    }

    /// The middleware dispatching requests to the routes registered so far.
    ///
    /// Routes registered after this call are not seen by the returned middleware.
    pub fn routes(&self) -> Routes {
        Routes { table: Arc::new(self.table.clone()) }
    }

    /// The method negotiation middleware for this router.
    ///
    /// Without `methods` in `options`, the methods of [`RouterOptions`] are used, then every
    /// known method.
    pub fn allowed_methods(&self, mut options: AllowedMethodsOptions) -> AllowedMethods {
        if options.methods.is_none() {
            options.methods = self.methods;
        }
        AllowedMethods::new(options)
    }
}

impl FromIterator<Router> for Router {
    fn from_iter<I: IntoIterator<Item = Router>>(iter: I) -> Self {
        Router::merge(iter)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.table.iter().map(Route::raw).collect::<Vec<_>>())
            .field("prefix", &self.prefix)
            .field("methods", &self.methods)
            .finish()
    }
}

/// Recorded in the request state when a route was dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    /// the template of the route
    pub path: String,
    pub methods: MethodSet,
    pub slugs: Slugs,
}

/// Recorded in the request state when no route allows the request method but some routes
/// match the path: the union of their methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathMethods(pub MethodSet);

/// The middleware produced by [`Router::routes`].
///
/// On a match it records a [`MatchedRoute`], turns a `404` status into `200`, attaches the slugs
/// to the request and returns whatever the route handler returns. Otherwise it runs the rest of
/// the chain.
#[derive(Clone)]
pub struct Routes {
    table: Arc<RouteTable<BoxMiddleware>>,
}

#[async_trait]
impl Middleware for Routes {
    async fn call(&self, ctx: &mut Context, next: Next<'_>) -> MiddlewareResult {
        let Some(matched) = match_route(ctx.req().method(), ctx.req().path(), self.table.as_slice()) else {
            let allowed = allowed_methods_for(ctx.req().path(), self.table.as_slice());
            trace!(method = %ctx.req().method(), path = ctx.req().path(), allowed = %allowed, "no route matched");
            if !allowed.is_empty() {
                ctx.state_mut().insert(PathMethods(allowed));
            }
            return next.run(ctx).await;
        };

        let route = matched.route();
        let slugs = matched.slugs();
        trace!(method = %ctx.req().method(), path = ctx.req().path(), route = route.raw(), "route matched");

        ctx.state_mut().insert(MatchedRoute { path: route.raw().to_owned(), methods: route.methods(), slugs: slugs.clone() });
        if ctx.res().status() == StatusCode::NOT_FOUND {
            ctx.res_mut().set_status(StatusCode::OK);
        }
        ctx.req_mut().set_slugs(slugs);

        route.handler().call(ctx, next).await
    }
}

impl fmt::Debug for Routes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routes").field("routes", &self.table.len()).finish()
    }
}
