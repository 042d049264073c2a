//! GraphQL-specific error types.
//!
//! Only transport-level failures are errors here. GraphQL-level errors
//! (`errors` in the body, `userErrors` on mutation payloads) come back with
//! HTTP 200 and are interpreted by the caller that knows the document's shape.

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for GraphQL API operations.
///
/// # Example
///
/// ```rust
/// use customer_sync::clients::graphql::GraphqlError;
/// use customer_sync::clients::{HttpError, HttpResponseError};
///
/// let http_error = HttpError::Response(HttpResponseError {
///     code: 401,
///     message: r#"{"errors":"Unauthorized"}"#.to_string(),
///     error_reference: None,
/// });
/// let graphql_error: GraphqlError = http_error.into();
/// assert!(graphql_error.to_string().contains("Unauthorized"));
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred.
    ///
    /// Includes network errors, timeouts and non-2xx responses.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl GraphqlError {
    /// Returns the timeout that elapsed, if this error is a timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<std::time::Duration> {
        match self {
            Self::Http(HttpError::Timeout { timeout }) => Some(*timeout),
            Self::Http(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpResponseError, InvalidHttpRequestError};
    use std::time::Duration;

    #[test]
    fn test_graphql_error_http_variant_wraps_http_error() {
        let graphql_error = GraphqlError::Http(HttpError::Response(HttpResponseError {
            code: 404,
            message: r#"{"errors":"Not Found"}"#.to_string(),
            error_reference: Some("abc-123".to_string()),
        }));

        assert!(graphql_error.to_string().contains("Not Found"));
        assert!(graphql_error.timeout().is_none());
    }

    #[test]
    fn test_timeout_is_exposed() {
        let graphql_error: GraphqlError = HttpError::Timeout {
            timeout: Duration::from_millis(250),
        }
        .into();

        assert_eq!(graphql_error.timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_from_http_error_conversion() {
        let graphql_error: GraphqlError =
            HttpError::InvalidRequest(InvalidHttpRequestError::MissingBodyType).into();

        assert!(matches!(
            graphql_error,
            GraphqlError::Http(HttpError::InvalidRequest(_))
        ));
    }
}
