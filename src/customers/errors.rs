//! Error types for customer reads and writes.
//!
//! Every failure of [`CustomerService`](crate::CustomerService) comes back as a
//! [`CustomerError`]; nothing is retried and nothing is swallowed.
//!
//! - [`CustomerError::Configuration`]: domain/token missing or invalid, before any request
//! - [`CustomerError::MissingField`]: the submission lacks a required value
//! - [`CustomerError::Transport`]: the HTTP round trip failed
//! - [`CustomerError::Timeout`]: the round trip exceeded the configured timeout
//! - [`CustomerError::MalformedResponse`]: the body did not have the expected shape
//! - [`CustomerError::Upstream`]: Shopify rejected the document itself
//! - [`CustomerError::UserErrors`]: Shopify rejected one or more input fields

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::GraphqlError;
use crate::error::ConfigError;

/// Notice shown for any failure that is not a field error.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong while talking to Shopify. Please try again.";

/// A field-level validation error reported in a mutation's `userErrors`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field (e.g. `["email"]`), if any.
    pub field: Option<Vec<String>>,
    /// Human-readable message from Shopify.
    pub message: String,
}

impl UserError {
    /// Returns the field path joined with `.`, if the error names a field.
    ///
    /// # Example
    ///
    /// ```rust
    /// use customer_sync::UserError;
    ///
    /// let error = UserError {
    ///     field: Some(vec!["input".to_string(), "email".to_string()]),
    ///     message: "Email has already been taken".to_string(),
    /// };
    /// assert_eq!(error.field_name().as_deref(), Some("input.email"));
    /// ```
    #[must_use]
    pub fn field_name(&self) -> Option<String> {
        self.field
            .as_ref()
            .filter(|path| !path.is_empty())
            .map(|path| path.join("."))
    }
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field_name() {
            Some(field) => write!(f, "{field}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// The non-empty list of `userErrors` a mutation returned, in upstream order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserErrors {
    first: UserError,
    rest: Vec<UserError>,
}

impl UserErrors {
    /// Builds the list, or `None` if Shopify reported no errors.
    #[must_use]
    pub fn from_vec(errors: Vec<UserError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let first = errors.next()?;
        Some(Self {
            first,
            rest: errors.collect(),
        })
    }

    /// The first reported error; the one shown next to the form.
    #[must_use]
    pub const fn first(&self) -> &UserError {
        &self.first
    }

    /// All reported errors, in order.
    pub fn iter(&self) -> impl Iterator<Item = &UserError> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    /// Number of reported errors (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for UserErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        if !self.rest.is_empty() {
            write!(f, " (and {} more)", self.rest.len())?;
        }
        Ok(())
    }
}

/// Error type for customer reads and writes.
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Required configuration is missing or invalid. No request was made.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A required submission field is empty. No request was made.
    #[error("Missing required customer field '{field}'.")]
    MissingField {
        /// Form name of the field.
        field: &'static str,
    },

    /// The HTTP round trip failed.
    #[error(transparent)]
    Transport(GraphqlError),

    /// The round trip exceeded the configured timeout.
    #[error("Shopify did not respond within {timeout:?}")]
    Timeout {
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The response body did not have the expected shape.
    #[error("Malformed response from Shopify: {reason}")]
    MalformedResponse {
        /// What was wrong with the body.
        reason: String,
    },

    /// Shopify rejected the request as a whole (top-level GraphQL `errors`).
    #[error("Shopify returned errors: {}", .messages.join("; "))]
    Upstream {
        /// The reported error messages.
        messages: Vec<String>,
    },

    /// Shopify rejected one or more input fields.
    #[error("{0}")]
    UserErrors(UserErrors),
}

impl CustomerError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Returns the field errors, if this is a field-level rejection.
    #[must_use]
    pub const fn user_errors(&self) -> Option<&UserErrors> {
        match self {
            Self::UserErrors(errors) => Some(errors),
            _ => None,
        }
    }

    /// Message to show the merchant.
    ///
    /// Field errors and missing fields are shown as-is next to the form; any
    /// other failure gets [`GENERIC_FAILURE_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UserErrors(errors) => errors.first().message.clone(),
            Self::MissingField { .. } => self.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<GraphqlError> for CustomerError {
    fn from(error: GraphqlError) -> Self {
        match error.timeout() {
            Some(timeout) => Self::Timeout { timeout },
            None => Self::Transport(error),
        }
    }
}
