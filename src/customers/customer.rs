//! Customer records and the create/update intent submitted from the page.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::customers::CustomerError;

/// Opaque identifier Shopify assigns to a customer
/// (e.g. `gid://shopify/Customer/7091253`).
///
/// # Example
///
/// ```rust
/// use customer_sync::CustomerId;
///
/// assert!(CustomerId::parse("gid://shopify/Customer/1").is_some());
/// assert!(CustomerId::parse("").is_none());
/// assert!(CustomerId::parse("   ").is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Parses an identifier, treating an empty or blank value as absent.
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A customer as Shopify stores it.
///
/// Always carries an `id`: values of this type only come from upstream
/// responses. Name and email are optional because Shopify allows either to
/// be blank on a customer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Upstream identifier.
    pub id: CustomerId,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

impl Customer {
    /// Returns `"{first} {last}"`, the name the customer list shows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use customer_sync::{Customer, CustomerId};
    ///
    /// let customer = Customer {
    ///     id: CustomerId::parse("gid://shopify/Customer/1").unwrap(),
    ///     first_name: Some("Ada".to_string()),
    ///     last_name: None,
    ///     email: None,
    /// };
    /// assert_eq!(customer.display_name(), "Ada");
    /// ```
    #[must_use]
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Pre-fills an edit submission addressed at this customer.
    #[must_use]
    pub fn to_submission(&self) -> CustomerSubmission {
        CustomerSubmission {
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            customer_id: Some(self.id.clone()),
        }
    }
}

/// Which upstream mutation a submission turns into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomerOperation<'a> {
    /// `customerCreate`.
    Create,
    /// `customerUpdate` addressed at the given customer.
    Update(&'a CustomerId),
}

/// Form field names of the inbound submission.
pub mod form_fields {
    /// First name field.
    pub const FIRST_NAME: &str = "firstName";
    /// Last name field.
    pub const LAST_NAME: &str = "lastName";
    /// Email field.
    pub const EMAIL: &str = "email";
    /// Identifier of the customer being edited; absent when creating.
    pub const CUSTOMER_ID: &str = "customerId";
}

/// Desired state of a customer, as submitted from the create prompt or the
/// edit modal.
///
/// Values are forwarded upstream verbatim; only presence is checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerSubmission {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Set when editing an existing customer.
    pub customer_id: Option<CustomerId>,
}

impl CustomerSubmission {
    /// Creates a submission for a new customer.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            customer_id: None,
        }
    }

    /// Addresses the submission at an existing customer.
    #[must_use]
    pub fn with_customer_id(mut self, id: CustomerId) -> Self {
        self.customer_id = Some(id);
        self
    }

    /// Parses the page's form submission.
    ///
    /// Unknown fields are ignored and an empty `customerId` counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::MissingField`] if `firstName`, `lastName` or
    /// `email` is absent or empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use customer_sync::{CustomerOperation, CustomerSubmission};
    ///
    /// let submission = CustomerSubmission::from_form([
    ///     ("firstName", "Ada"),
    ///     ("lastName", "Lovelace"),
    ///     ("email", "ada@example.com"),
    ///     ("customerId", ""),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(submission.operation(), CustomerOperation::Create);
    /// ```
    pub fn from_form<I, K, V>(fields: I) -> Result<Self, CustomerError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut first_name = None;
        let mut last_name = None;
        let mut email = None;
        let mut customer_id = None;

        for (key, value) in fields {
            match key.as_ref() {
                form_fields::FIRST_NAME => first_name = Some(value.into()),
                form_fields::LAST_NAME => last_name = Some(value.into()),
                form_fields::EMAIL => email = Some(value.into()),
                form_fields::CUSTOMER_ID => customer_id = CustomerId::parse(value),
                _ => {}
            }
        }

        let submission = Self {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            customer_id,
        };
        submission.validate()?;
        Ok(submission)
    }

    /// Checks that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::MissingField`] naming the first empty or
    /// blank field, the same rule [`CustomerId::parse`] applies to ids.
    pub fn validate(&self) -> Result<(), CustomerError> {
        let required = [
            (form_fields::FIRST_NAME, &self.first_name),
            (form_fields::LAST_NAME, &self.last_name),
            (form_fields::EMAIL, &self.email),
        ];

        match required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(CustomerError::MissingField { field }),
            None => Ok(()),
        }
    }

    /// Decides between create and update from `customer_id` alone.
    #[must_use]
    pub const fn operation(&self) -> CustomerOperation<'_> {
        match &self.customer_id {
            Some(id) => CustomerOperation::Update(id),
            None => CustomerOperation::Create,
        }
    }
}
