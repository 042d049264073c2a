//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! bad or missing setting is reported once, when the configuration is built,
//! rather than on the first upstream call.
//!
//! # Example
//!
//! ```rust
//! use customer_sync::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`ShopifyConfig`](crate::ShopifyConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Shopify Admin API access token.")]
    EmptyAccessToken,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-07') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required builder field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is unset or blank.
    #[error("Missing required environment variable '{name}'.")]
    MissingEnvironmentVariable {
        /// The name of the variable.
        name: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'http://127.0.0.1:8080').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Request timeout is not a positive number of seconds.
    #[error("Invalid request timeout '{value}'. Expected a positive number of seconds.")]
    InvalidTimeout {
        /// The raw value that was provided.
        value: String,
    },
}

impl ConfigError {
    /// Returns `true` if this error means a required setting was not supplied
    /// at all, as opposed to supplied with an invalid value.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField { .. } | Self::MissingEnvironmentVariable { .. }
        )
    }
}
