//! Shopify Admin API version.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A Shopify Admin API version, as it appears in the endpoint path.
///
/// Shopify releases versions quarterly, named `YYYY-MM` with the month one of
/// `01`, `04`, `07` or `10`. `unstable` is also accepted.
///
/// # Example
///
/// ```rust
/// use customer_sync::ApiVersion;
///
/// let version: ApiVersion = "2025-01".parse().unwrap();
/// assert_eq!(version.to_string(), "2025-01");
/// assert_eq!(ApiVersion::default().to_string(), "2024-07");
/// assert!("2025-02".parse::<ApiVersion>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// The version the customers page was written against.
    pub const DEFAULT: &'static str = "2024-07";

    const UNSTABLE: &'static str = "unstable";

    /// Returns the `unstable` API version.
    #[must_use]
    pub fn unstable() -> Self {
        Self(Self::UNSTABLE.to_string())
    }

    /// Returns `true` for the `unstable` version.
    #[must_use]
    pub fn is_unstable(&self) -> bool {
        self.0 == Self::UNSTABLE
    }

    /// Returns the version string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid_release(s: &str) -> bool {
        let Some((year, month)) = s.split_once('-') else {
            return false;
        };

        year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && matches!(month, "01" | "04" | "07" | "10")
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        if s == Self::UNSTABLE || Self::is_valid_release(&s) {
            Ok(Self(s))
        } else {
            Err(ConfigError::InvalidApiVersion { version: s })
        }
    }
}
