use crate::methods::MethodSet;
use crate::pattern::PathPattern;
use http::Method;
use std::slice;

/// A compiled path pattern bound to one or more methods and a handler.
///
/// A route is immutable once registered; slug values of a request live in a
/// [`RouteMatch`](crate::RouteMatch), never on the route.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pattern: PathPattern,
    methods: MethodSet,
    handler: H,
}

impl<H> Route<H> {
    pub fn new(pattern: PathPattern, methods: MethodSet, handler: H) -> Self {
        Self { pattern, methods, handler }
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The fully prefixed template
    #[inline]
    pub fn raw(&self) -> &str {
        self.pattern.raw()
    }

    pub fn methods(&self) -> MethodSet {
        self.methods
    }

    #[inline]
    pub fn allows(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// Registered routes, in registration order.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self { routes: vec![] }
    }

    pub fn push(&mut self, route: Route<H>) {
        self.routes.push(route);
    }

    /// Moves every route of `other` to the end of this table, keeping their order
    pub fn append(&mut self, other: &mut RouteTable<H>) {
        self.routes.append(&mut other.routes);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Route<H>> {
        self.routes.iter()
    }

    pub fn as_slice(&self) -> &[Route<H>] {
        &self.routes
    }
}

impl<H> Extend<Route<H>> for RouteTable<H> {
    fn extend<I: IntoIterator<Item = Route<H>>>(&mut self, iter: I) {
        self.routes.extend(iter);
    }
}

impl<H> FromIterator<Route<H>> for RouteTable<H> {
    fn from_iter<I: IntoIterator<Item = Route<H>>>(iter: I) -> Self {
        Self { routes: iter.into_iter().collect() }
    }
}

impl<'a, H> IntoIterator for &'a RouteTable<H> {
    type Item = &'a Route<H>;
    type IntoIter = slice::Iter<'a, Route<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Route, RouteTable};
    use crate::{IntoMethodSet, PathPattern};
    use http::Method;

    fn route(template: &str, handler: &'static str) -> Route<&'static str> {
        Route::new(PathPattern::compile(template).unwrap(), Method::GET.into_method_set().unwrap(), handler)
    }

    #[test]
    fn test_route() {
        let route = route("/users/:id", "show");
        assert_eq!(route.raw(), "/users/:id");
        assert!(route.allows(&Method::GET));
        assert!(!route.allows(&Method::POST));
        assert_eq!(*route.handler(), "show");
    }

    #[test]
    fn test_append_keeps_order() {
        let mut first: RouteTable<_> = [route("/a", "a"), route("/b", "b")].into_iter().collect();
        let mut second: RouteTable<_> = [route("/c", "c")].into_iter().collect();

        first.append(&mut second);

        assert!(second.is_empty());
        assert_eq!(first.iter().map(Route::raw).collect::<Vec<_>>(), ["/a", "/b", "/c"]);
    }
}
