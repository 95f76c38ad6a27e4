use thiserror::Error;

/// A path template that cannot be compiled.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("expect path \"{path}\" to start with \"/\"")]
    MissingLeadingSlash { path: String },

    #[error("expect \"{name}\" to be a legal part of path \"{path}\"")]
    IllegalSlugName { name: String, path: String },

    #[error("expect \"*\" or \"**\" in path \"{path}\", found {run} \"*\"")]
    UnsupportedWildcard { path: String, run: usize },

    #[error("path \"{path}\" compiles to an invalid regular expression: {source}")]
    InvalidRegex {
        path: String,
        #[source]
        source: regex::Error,
    },
}

impl PatternError {
    pub fn missing_leading_slash<S: ToString>(path: S) -> Self {
        Self::MissingLeadingSlash { path: path.to_string() }
    }

    pub fn illegal_slug_name<N: ToString, S: ToString>(name: N, path: S) -> Self {
        Self::IllegalSlugName { name: name.to_string(), path: path.to_string() }
    }

    pub fn unsupported_wildcard<S: ToString>(path: S, run: usize) -> Self {
        Self::UnsupportedWildcard { path: path.to_string(), run }
    }

    pub fn invalid_regex<S: ToString>(path: S, source: regex::Error) -> Self {
        Self::InvalidRegex { path: path.to_string(), source }
    }
}

/// Errors raised while setting up a router. All of them are fatal to the setup.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("invalid route pattern: {source}")]
    Pattern {
        #[from]
        source: PatternError,
    },

    #[error("unsupported method \"{method}\"")]
    UnsupportedMethod { method: String },

    #[error("route \"{path}\" requires at least one method")]
    EmptyMethods { path: String },

    #[error("\"{key}\" pathname required")]
    MissingPath { key: String },
}

impl RouterError {
    pub fn unsupported_method<S: ToString>(method: S) -> Self {
        Self::UnsupportedMethod { method: method.to_string() }
    }

    pub fn empty_methods<S: ToString>(path: S) -> Self {
        Self::EmptyMethods { path: path.to_string() }
    }

    pub fn missing_path<S: ToString>(key: S) -> Self {
        Self::MissingPath { key: key.to_string() }
    }
}
