//! Configuration for talking to a shop's Admin API.
//!
//! # Overview
//!
//! - [`ShopifyConfig`]: validated settings, built once and injected into clients
//! - [`ShopifyConfigBuilder`]: builder for [`ShopifyConfig`]
//! - [`ConfigSource`] / [`EnvConfigSource`]: where [`ShopifyConfig::from_env`]
//!   reads its values from
//! - [`AccessToken`], [`ShopDomain`], [`HostUrl`], [`ApiVersion`]: validated values
//!
//! # Example
//!
//! ```rust
//! use customer_sync::{AccessToken, ShopDomain, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_123").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop().as_ref(), "my-store.myshopify.com");
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, HostUrl, ShopDomain};
pub use version::ApiVersion;

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the shop domain.
pub const SHOP_DOMAIN_ENV: &str = "SHOPIFY_DOMAIN";
/// Environment variable holding the Admin API access token.
pub const ACCESS_TOKEN_ENV: &str = "SHOPIFY_ACCESS_TOKEN";
/// Environment variable overriding the API version.
pub const API_VERSION_ENV: &str = "SHOPIFY_API_VERSION";
/// Environment variable overriding the base URI requests are sent to.
pub const API_HOST_ENV: &str = "SHOPIFY_API_HOST";
/// Environment variable setting a request timeout, in seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "SHOPIFY_REQUEST_TIMEOUT_SECS";

/// Source of raw configuration values.
///
/// Lets configuration loading be tested against an in-memory map instead of
/// mutating the process environment.
pub trait ConfigSource {
    /// Fetch a value by name.
    fn value(&self, name: &str) -> Option<String>;
}

/// [`ConfigSource`] backed by the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvConfigSource;

impl ConfigSource for EnvConfigSource {
    fn value(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl<S: std::hash::BuildHasher> ConfigSource for std::collections::HashMap<String, String, S> {
    fn value(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Validated settings for Admin API access.
///
/// # Thread Safety
///
/// `ShopifyConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    shop: ShopDomain,
    access_token: AccessToken,
    api_version: ApiVersion,
    api_host: Option<HostUrl>,
    request_timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ShopifyConfig {
    /// Creates a new builder for constructing a `ShopifyConfig`.
    #[must_use]
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::new()
    }

    /// Loads configuration from the process environment.
    ///
    /// See [`from_source`](Self::from_source) for the variables read.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or any
    /// value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&EnvConfigSource)
    }

    /// Loads configuration from a [`ConfigSource`].
    ///
    /// Reads `SHOPIFY_DOMAIN` and `SHOPIFY_ACCESS_TOKEN` (required), and
    /// `SHOPIFY_API_VERSION`, `SHOPIFY_API_HOST`, `SHOPIFY_REQUEST_TIMEOUT_SECS`
    /// (optional). Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvironmentVariable`] for a missing
    /// required variable, or the matching validation error for a bad value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use customer_sync::{ConfigError, ShopifyConfig};
    ///
    /// let mut vars = HashMap::new();
    /// vars.insert("SHOPIFY_DOMAIN".to_string(), "my-store".to_string());
    ///
    /// let result = ShopifyConfig::from_source(&vars);
    /// assert!(matches!(
    ///     result,
    ///     Err(ConfigError::MissingEnvironmentVariable { name: "SHOPIFY_ACCESS_TOKEN" })
    /// ));
    /// ```
    pub fn from_source(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let lookup = |name: &str| source.value(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| {
            lookup(name).ok_or(ConfigError::MissingEnvironmentVariable { name })
        };

        let shop = ShopDomain::new(required(SHOP_DOMAIN_ENV)?)?;
        let access_token = AccessToken::new(required(ACCESS_TOKEN_ENV)?)?;

        let mut builder = Self::builder().shop(shop).access_token(access_token);

        if let Some(version) = lookup(API_VERSION_ENV) {
            builder = builder.api_version(version.parse()?);
        }
        if let Some(host) = lookup(API_HOST_ENV) {
            builder = builder.api_host(HostUrl::new(host)?);
        }
        if let Some(raw) = lookup(REQUEST_TIMEOUT_ENV) {
            builder = builder.request_timeout(parse_timeout(&raw)?);
        }

        builder.build()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the base URI override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ShopifyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyConfig>();
};

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidTimeout {
        value: raw.to_string(),
    };
    let secs: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

/// Builder for constructing [`ShopifyConfig`] instances.
///
/// `shop` and `access_token` are required.
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::DEFAULT`]
/// - `api_host`: `None` (requests go to `https://{shop}`)
/// - `request_timeout`: `None` (no timeout)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ShopifyConfigBuilder {
    shop: Option<ShopDomain>,
    access_token: Option<AccessToken>,
    api_version: Option<ApiVersion>,
    api_host: Option<HostUrl>,
    request_timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ShopifyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sends requests to this host instead of the shop domain.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Bounds every upstream round trip by `timeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ShopifyConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop` or
    /// `access_token` are not set.
    pub fn build(self) -> Result<ShopifyConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        let api_version = self.api_version.unwrap_or_default();
        if api_version.is_unstable() {
            tracing::debug!("Shopify client configured for the unstable API version");
        }

        Ok(ShopifyConfig {
            shop,
            access_token,
            api_version,
            api_host: self.api_host,
            request_timeout: self.request_timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
