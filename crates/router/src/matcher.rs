//! Best route selection for a request.
//!
//! 1. A route whose template equals the path byte for byte and has no slugs wins at once.
//! 2. Otherwise every route allowing the method and matching the whole path is a candidate,
//!    and the candidate with the longest template wins. Between templates of equal length the
//!    first registered one wins.
//!
//! Matching only reads the routes: slug values are allocated for every match and owned by the
//! returned [`RouteMatch`], so any number of requests can match against the same routes at once.

use crate::methods::MethodSet;
use crate::route::Route;
use http::Method;
use micro_web::Slugs;

/// The route chosen for one request, with the slug values captured from its path.
#[derive(Debug)]
pub struct RouteMatch<'r, H> {
    route: &'r Route<H>,
    slug_values: Vec<String>,
}

impl<'r, H> RouteMatch<'r, H> {
    pub fn route(&self) -> &'r Route<H> {
        self.route
    }

    /// Captured values, aligned with the route's slug names
    pub fn slug_values(&self) -> &[String] {
        &self.slug_values
    }

    /// Pairs slug names with their values
    pub fn slugs(&self) -> Slugs {
        self.route
            .pattern()
            .slug_names()
            .iter()
            .zip(self.slug_values.iter())
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }
}

/// Selects the route for `method` and `path`, `None` when no route matches.
pub fn match_route<'r, H>(method: &Method, path: &str, routes: &'r [Route<H>]) -> Option<RouteMatch<'r, H>> {
    let exact = routes.iter().find(|route| route.allows(method) && !route.pattern().has_slugs() && route.raw() == path);
    if let Some(route) = exact {
        return Some(RouteMatch { route, slug_values: vec![] });
    }

    routes
        .iter()
        .filter(|route| route.allows(method))
        .filter_map(|route| route.pattern().captures(path).map(|slug_values| RouteMatch { route, slug_values }))
        .reduce(|best, candidate| if candidate.route.raw().len() > best.route.raw().len() { candidate } else { best })
}

/// The methods of every route whose pattern matches `path`, whatever their methods.
pub fn allowed_methods_for<H>(path: &str, routes: &[Route<H>]) -> MethodSet {
    routes
        .iter()
        .filter(|route| route.pattern().is_match(path))
        .fold(MethodSet::empty(), |allowed, route| allowed.union(route.methods()))
}
