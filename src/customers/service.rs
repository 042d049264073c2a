//! The customer reader and writer.

use crate::clients::{GraphqlClient, GraphqlTransport};
use crate::config::{ConfigSource, EnvConfigSource, ShopifyConfig};
use crate::customers::queries::{
    self, CustomerInput, CUSTOMERS_QUERY, CUSTOMER_CREATE_MUTATION, CUSTOMER_UPDATE_MUTATION,
};
use crate::customers::response::{self, MutationKind};
use crate::customers::{Customer, CustomerError, CustomerOperation, CustomerSubmission};

/// Lists and saves customers of one shop.
///
/// Each call sends at most one GraphQL request. Nothing is cached between
/// calls, so concurrent calls are independent and the service can be shared
/// behind an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// use customer_sync::{CustomerService, CustomerSubmission};
///
/// let service = CustomerService::from_env()?;
///
/// let created = service
///     .submit_customer(CustomerSubmission::new("Ada", "Lovelace", "ada@example.com"))
///     .await?;
///
/// for customer in service.list_customers().await? {
///     println!("{} <{}>", customer.display_name(), customer.email.unwrap_or_default());
/// }
/// ```
#[derive(Debug)]
pub struct CustomerService<T = GraphqlClient> {
    transport: T,
}

impl CustomerService<GraphqlClient> {
    /// Creates a service that talks to the shop in `config`.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        Self::with_transport(GraphqlClient::new(config))
    }

    /// Creates a service from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::Configuration`] if the shop domain or access
    /// token is missing or invalid. No request is made in that case.
    pub fn from_env() -> Result<Self, CustomerError> {
        Self::from_source(&EnvConfigSource)
    }

    /// Creates a service from a [`ConfigSource`].
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::Configuration`] if the shop domain or access
    /// token is missing or invalid.
    pub fn from_source(source: &impl ConfigSource) -> Result<Self, CustomerError> {
        let config = ShopifyConfig::from_source(source)?;
        Ok(Self::new(&config))
    }
}

impl<T: GraphqlTransport> CustomerService<T> {
    /// Creates a service over any [`GraphqlTransport`].
    #[must_use]
    pub const fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the first page of customers in upstream order.
    ///
    /// Returns at most [`PAGE_SIZE`](queries::PAGE_SIZE) customers. An empty
    /// shop yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`CustomerError::Transport`] or [`CustomerError::Timeout`] if the
    ///   round trip fails
    /// - [`CustomerError::Upstream`] if Shopify reports top-level errors
    /// - [`CustomerError::MalformedResponse`] if `data.customers.edges` is
    ///   missing or not a list of customers
    pub async fn list_customers(&self) -> Result<Vec<Customer>, CustomerError> {
        let variables = queries::customers_variables()?;
        let body = self.transport.execute(CUSTOMERS_QUERY, variables).await?;

        let customers = response::parse_customers(body).map_err(log_malformed)?;
        tracing::debug!("Fetched {} customers", customers.len());
        Ok(customers)
    }

    /// Creates or updates a customer and returns the record Shopify confirmed.
    ///
    /// A submission without a customer id becomes `customerCreate` and is
    /// tagged `"42"`. A submission with one becomes `customerUpdate` for that
    /// id and carries no tags.
    ///
    /// # Errors
    ///
    /// - [`CustomerError::MissingField`] if a required field is empty; no
    ///   request is made
    /// - [`CustomerError::UserErrors`] if Shopify rejects an input field
    /// - [`CustomerError::Transport`], [`CustomerError::Timeout`],
    ///   [`CustomerError::Upstream`] or [`CustomerError::MalformedResponse`]
    ///   as for [`list_customers`](Self::list_customers)
    pub async fn submit_customer(
        &self,
        submission: CustomerSubmission,
    ) -> Result<Customer, CustomerError> {
        submission.validate()?;

        let (kind, document, input) = match submission.operation() {
            CustomerOperation::Create => (
                MutationKind::Create,
                CUSTOMER_CREATE_MUTATION,
                CustomerInput::for_create(&submission),
            ),
            CustomerOperation::Update(id) => (
                MutationKind::Update,
                CUSTOMER_UPDATE_MUTATION,
                CustomerInput::for_update(&submission, id.as_str()),
            ),
        };
        let variables = queries::mutation_variables(input)?;
        tracing::debug!("Submitting {}", kind.field_name());

        let body = self.transport.execute(document, variables).await?;

        match response::parse_mutation(kind, body) {
            Ok(customer) => {
                tracing::debug!("{} confirmed customer {}", kind.field_name(), customer.id);
                Ok(customer)
            }
            Err(CustomerError::UserErrors(errors)) => {
                tracing::warn!("{} rejected: {}", kind.field_name(), errors);
                Err(CustomerError::UserErrors(errors))
            }
            Err(error) => Err(log_malformed(error)),
        }
    }
}

fn log_malformed(error: CustomerError) -> CustomerError {
    if let CustomerError::MalformedResponse { reason } = &error {
        tracing::warn!("Malformed response from Shopify: {}", reason);
    }
    error
}
