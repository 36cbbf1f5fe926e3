//! Error handling types

use std::fmt;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Backing source that produced a [`Error::BackingStore`] failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Relational user/entity store
    Relational,
    /// Analytical query engine
    Analytical,
    /// Message broker
    Broker,
    /// Importer list in the key/value store
    ImporterQueue,
    /// Time-series listen store
    ListenStore,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Relational => "relational",
            Self::Analytical => "analytical",
            Self::Broker => "broker",
            Self::ImporterQueue => "importer-queue",
            Self::ListenStore => "listen-store",
        };
        f.write_str(name)
    }
}

/// Main error type for lbstats
#[derive(Error, Debug)]
pub enum Error {
    /// Cache store could not be reached
    ///
    /// Recovered locally: the resolver bypasses the cache and fetches directly.
    #[error("Cache unavailable: {message}")]
    CacheUnavailable {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Key absent or expired
    #[error("Cache miss: {key}")]
    CacheMiss {
        /// The key that was looked up
        key: String,
    },

    /// A backing source failed or timed out
    #[error("Backing store error ({kind}): {message}")]
    BackingStore {
        /// Which backing source failed
        kind: SourceKind,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed aggregate request
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the validation failure
        message: String,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Cache error creation methods
impl Error {
    /// Create a cache-unavailable error
    pub fn cache_unavailable<S: Into<String>>(message: S) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a cache-unavailable error with source
    pub fn cache_unavailable_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a cache miss error
    pub fn cache_miss<S: Into<String>>(key: S) -> Self {
        Self::CacheMiss { key: key.into() }
    }

    /// True if the cache store itself could not be reached
    pub fn is_cache_unavailable(&self) -> bool {
        matches!(self, Self::CacheUnavailable { .. })
    }

    /// True if the key was absent or expired
    pub fn is_cache_miss(&self) -> bool {
        matches!(self, Self::CacheMiss { .. })
    }
}

// Backing store error creation methods
impl Error {
    /// Create a backing store error
    pub fn backing_store<S: Into<String>>(kind: SourceKind, message: S) -> Self {
        Self::BackingStore {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a backing store error with source
    pub fn backing_store_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        kind: SourceKind,
        message: S,
        source: E,
    ) -> Self {
        Self::BackingStore {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The failing source, if this is a backing store error
    pub fn source_kind(&self) -> Option<SourceKind> {
        match self {
            Self::BackingStore { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

// Validation, configuration and internal error creation methods
impl Error {
    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
