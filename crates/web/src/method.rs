//! The closed set of HTTP methods the framework knows about.
//!
//! `http::Method` accepts arbitrary extension methods; routing and method negotiation only
//! deal with the methods listed here.

use http::Method;

/// Every known method, in the order used when listing them (e.g. in an `Allow` header)
pub static KNOWN_METHODS: [Method; 9] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::CONNECT,
    Method::OPTIONS,
    Method::TRACE,
    Method::PATCH,
];

/// Looks up a known method by its exact (upper case) name
pub fn from_name(name: &str) -> Option<Method> {
    KNOWN_METHODS.iter().find(|method| method.as_str() == name).cloned()
}

/// The position of `method` in [`KNOWN_METHODS`], `None` for extension methods
pub fn index_of(method: &Method) -> Option<usize> {
    KNOWN_METHODS.iter().position(|known| known == method)
}

#[inline]
pub fn is_known(method: &Method) -> bool {
    index_of(method).is_some()
}

#[cfg(test)]
mod tests {
    use super::{KNOWN_METHODS, from_name, index_of, is_known};
    use http::Method;

    #[test]
    fn test_from_name() {
        assert_eq!(from_name("GET"), Some(Method::GET));
        assert_eq!(from_name("PATCH"), Some(Method::PATCH));
        assert_eq!(from_name("get"), None);
        assert_eq!(from_name("PURGE"), None);
    }

    #[test]
    fn test_extension_method_is_unknown() {
        let purge = Method::from_bytes(b"PURGE").unwrap();
        assert!(!is_known(&purge));
        assert!(KNOWN_METHODS.iter().all(is_known));
        assert_eq!(index_of(&Method::GET), Some(0));
    }
}
