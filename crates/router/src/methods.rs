//! Sets of HTTP methods a route answers to.

use crate::error::RouterError;
use http::{HeaderValue, Method};
use micro_web::method::{KNOWN_METHODS, from_name, index_of, is_known};
use serde::Deserialize;
use std::fmt;

/// A set of known HTTP methods, iterated in the order of [`KNOWN_METHODS`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct MethodSet {
    bits: u16,
}

impl MethodSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Every known method
    pub fn all() -> Self {
        KNOWN_METHODS.iter().collect()
    }

    /// Adds `method`, returns false for a method outside [`KNOWN_METHODS`]
    pub fn insert(&mut self, method: &Method) -> bool {
        match index_of(method) {
            Some(index) => {
                self.bits |= 1 << index;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, method: &Method) -> bool {
        index_of(method).is_some_and(|index| self.bits & (1 << index) != 0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[must_use]
    pub fn union(self, other: MethodSet) -> MethodSet {
        MethodSet { bits: self.bits | other.bits }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Method> + use<> {
        let bits = self.bits;
        KNOWN_METHODS.iter().enumerate().filter(move |&(index, _)| bits & (1 << index) != 0).map(|(_, method)| method)
    }

    /// The method names, in listing order
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(Method::as_str).collect()
    }

    /// Renders the set as an `Allow` header value, e.g. `GET, HEAD`
    pub fn to_header_value(&self) -> HeaderValue {
        // method names are plain tokens, always a valid header value
        HeaderValue::try_from(self.to_string()).unwrap_or_else(|_| HeaderValue::from_static(""))
    }

    /// Parses `GET`, `get|post` or `GET|HEAD`; every name must be a known method
    pub fn parse(names: &str) -> Result<MethodSet, RouterError> {
        names.split('|').map(str::trim).map(|name| name.to_ascii_uppercase()).try_fold(
            MethodSet::empty(),
            |mut set, name| {
                let method = from_name(&name).ok_or_else(|| RouterError::unsupported_method(&name))?;
                set.insert(&method);
                Ok(set)
            },
        )
    }
}

impl fmt::Debug for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(", "))
    }
}

impl TryFrom<Vec<String>> for MethodSet {
    type Error = RouterError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        names.iter().try_fold(MethodSet::empty(), |set, name| Ok(set.union(MethodSet::parse(name)?)))
    }
}

impl<'a> FromIterator<&'a Method> for MethodSet {
    /// collects the known methods, extension methods are dropped
    fn from_iter<I: IntoIterator<Item = &'a Method>>(iter: I) -> Self {
        iter.into_iter().fold(MethodSet::empty(), |mut set, method| {
            set.insert(method);
            set
        })
    }
}

/// Conversion into the method set of a route.
///
/// Accepts a bare method, a list of methods, or names such as `"GET|POST"`. Fails on methods
/// outside [`KNOWN_METHODS`]; the router rejects an empty result.
pub trait IntoMethodSet {
    fn into_method_set(self) -> Result<MethodSet, RouterError>;
}

impl IntoMethodSet for MethodSet {
    fn into_method_set(self) -> Result<MethodSet, RouterError> {
        Ok(self)
    }
}

impl IntoMethodSet for &Method {
    fn into_method_set(self) -> Result<MethodSet, RouterError> {
        if !is_known(self) {
            return Err(RouterError::unsupported_method(self));
        }
        Ok(std::iter::once(self).collect())
    }
}

impl IntoMethodSet for Method {
    fn into_method_set(self) -> Result<MethodSet, RouterError> {
        (&self).into_method_set()
    }
}

impl IntoMethodSet for &[Method] {
    fn into_method_set(self) -> Result<MethodSet, RouterError> {
        self.iter().try_fold(MethodSet::empty(), |set, method| Ok(set.union(method.into_method_set()?)))
    }
}

impl<const N: usize> IntoMethodSet for [Method; N] {
    fn into_method_set(self) -> Result<MethodSet, RouterError> {
        self.as_slice().into_method_set()
    }
}

impl IntoMethodSet for Vec<Method> {
    fn into_method_set(self) -> Result<MethodSet, RouterError> {
        self.as_slice().into_method_set()
    }
}

impl IntoMethodSet for &str {
    fn into_method_set(self) -> Result<MethodSet, RouterError> {
        MethodSet::parse(self)
    }
}
