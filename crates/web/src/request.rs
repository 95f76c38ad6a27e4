//! Request side of the middleware context.
//!
//! This module contains:
//! - `Request`: the request head a middleware sees, plus the slugs a router attached to it
//! - `Slugs`: named path segments extracted from the request path

use http::request::Parts;
use http::{HeaderMap, Method, Uri, Version};
use std::collections::HashMap;

/// The request head of the current exchange.
///
/// The body is not part of it: body parsing belongs to the host server.
#[derive(Debug)]
pub struct Request {
    parts: Parts,
    slugs: Slugs,
}

impl Request {
    /// Creates a request from the head of an `http::Request`
    pub fn new(parts: Parts) -> Self {
        Self { parts, slugs: Slugs::empty() }
    }

    /// Returns the HTTP method of the request
    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    /// Returns the URI of the request
    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    /// Returns the request path, without query string
    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// Returns the HTTP version of the request
    pub fn version(&self) -> Version {
        self.parts.version
    }

    /// Returns the HTTP headers of the request
    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Returns the slugs extracted by the router, empty until a route matched
    pub fn slugs(&self) -> &Slugs {
        &self.slugs
    }

    pub fn set_slugs(&mut self, slugs: Slugs) {
        self.slugs = slugs;
    }
}

impl From<Parts> for Request {
    fn from(parts: Parts) -> Self {
        Request::new(parts)
    }
}

impl<B> From<http::Request<B>> for Request {
    fn from(request: http::Request<B>) -> Self {
        Request::new(request.into_parts().0)
    }
}

/// Named path segments extracted from the URL path of a request.
///
/// For the template "/users/:id" and the path "/users/42", `id` is a slug with value "42".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slugs {
    inner: HashMap<String, String>,
}

impl Slugs {
    /// Creates an empty Slugs instance with no values
    #[inline]
    pub fn empty() -> Self {
        Self { inner: HashMap::new() }
    }

    /// Returns true if there are no slugs
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of slugs
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Gets the value of a slug by its name
    /// Returns None if the slug doesn't exist
    #[inline]
    pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
        self.inner.get(name.as_ref()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

// a later name wins when a template repeats a slug name
impl<K, V> FromIterator<(K, V)> for Slugs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { inner: iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect() }
    }
}
