//! Serializable result of a save, as the page renders it.

use serde::Serialize;

use crate::customers::{Customer, CustomerError};

/// What the page shows after a submission.
///
/// Serializes to the customer object itself on success,
/// `{"error": ..., "field": ...}` for a field error, and `{"error": ...}`
/// otherwise.
///
/// # Example
///
/// ```rust
/// use customer_sync::{CustomerError, SubmitOutcome};
///
/// let outcome = SubmitOutcome::from(Err(CustomerError::MissingField { field: "email" }));
/// let json = serde_json::to_value(&outcome).unwrap();
///
/// assert_eq!(json["field"], "email");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmitOutcome {
    /// The customer Shopify confirmed.
    Saved(Customer),
    /// Shown next to the offending form field.
    Rejected {
        /// Message for the merchant.
        error: String,
        /// Field the message belongs to, if known.
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },
    /// Shown as a page-level notice.
    Failed {
        /// Message for the merchant.
        error: String,
    },
}

impl SubmitOutcome {
    /// Returns `true` if the customer was saved.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

impl From<Result<Customer, CustomerError>> for SubmitOutcome {
    fn from(result: Result<Customer, CustomerError>) -> Self {
        match result {
            Ok(customer) => Self::Saved(customer),
            Err(CustomerError::UserErrors(errors)) => Self::Rejected {
                error: errors.first().message.clone(),
                field: errors.first().field_name(),
            },
            Err(CustomerError::MissingField { field }) => Self::Rejected {
                error: CustomerError::MissingField { field }.user_message(),
                field: Some(field.to_string()),
            },
            Err(error) => {
                tracing::warn!("Customer save failed: {}", error);
                Self::Failed {
                    error: error.user_message(),
                }
            }
        }
    }
}
