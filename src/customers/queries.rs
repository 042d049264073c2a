//! GraphQL documents and their variables.
//!
//! Documents are fixed strings. Everything the merchant typed travels in
//! `variables`, so no input can change the shape of a document.

use serde::Serialize;
use serde_json::Value;

use crate::customers::{CustomerError, CustomerSubmission};

/// Number of customers fetched for the list.
pub const PAGE_SIZE: u32 = 10;

/// Tag attached to every customer created through the page.
pub const CREATED_CUSTOMER_TAG: &str = "42";

/// First page of customers, flattened from `edges { node }` by the reader.
pub const CUSTOMERS_QUERY: &str = r"query Customers($first: Int!) {
  customers(first: $first) {
    edges {
      node {
        id
        firstName
        lastName
        email
      }
    }
  }
}";

/// Creates a customer.
pub const CUSTOMER_CREATE_MUTATION: &str = r"mutation CustomerCreate($input: CustomerInput!) {
  customerCreate(input: $input) {
    customer {
      id
      firstName
      lastName
      email
    }
    userErrors {
      field
      message
    }
  }
}";

/// Updates the customer named by `input.id`.
pub const CUSTOMER_UPDATE_MUTATION: &str = r"mutation CustomerUpdate($input: CustomerInput!) {
  customerUpdate(input: $input) {
    customer {
      id
      firstName
      lastName
      email
    }
    userErrors {
      field
      message
    }
  }
}";

#[derive(Serialize)]
struct CustomersVariables {
    first: u32,
}

/// The `CustomerInput` sent with both mutations.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput<'a> {
    /// Set for updates only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    /// First name.
    pub first_name: &'a str,
    /// Last name.
    pub last_name: &'a str,
    /// Email address.
    pub email: &'a str,
    /// Set for creates only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<[&'static str; 1]>,
}

impl<'a> CustomerInput<'a> {
    /// Input for `customerCreate`, tagged with [`CREATED_CUSTOMER_TAG`].
    #[must_use]
    pub fn for_create(submission: &'a CustomerSubmission) -> Self {
        Self {
            id: None,
            first_name: &submission.first_name,
            last_name: &submission.last_name,
            email: &submission.email,
            tags: Some([CREATED_CUSTOMER_TAG]),
        }
    }

    /// Input for `customerUpdate` addressed at `id`; never carries tags.
    #[must_use]
    pub fn for_update(submission: &'a CustomerSubmission, id: &'a str) -> Self {
        Self {
            id: Some(id),
            first_name: &submission.first_name,
            last_name: &submission.last_name,
            email: &submission.email,
            tags: None,
        }
    }
}

#[derive(Serialize)]
struct MutationVariables<'a> {
    input: CustomerInput<'a>,
}

/// Variables for [`CUSTOMERS_QUERY`].
pub(crate) fn customers_variables() -> Result<Value, CustomerError> {
    to_variables(&CustomersVariables { first: PAGE_SIZE })
}

/// Variables for either mutation.
pub(crate) fn mutation_variables(input: CustomerInput<'_>) -> Result<Value, CustomerError> {
    to_variables(&MutationVariables { input })
}

fn to_variables(variables: &impl Serialize) -> Result<Value, CustomerError> {
    serde_json::to_value(variables)
        .map_err(|e| CustomerError::malformed(format!("could not encode variables: {e}")))
}
