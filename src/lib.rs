//! # Shopify Customer Sync
//!
//! Lists and saves a shop's customers through the Shopify Admin GraphQL API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ShopifyConfig`] and [`ShopifyConfigBuilder`],
//!   loaded once from the environment or built explicitly
//! - Validated newtypes for the shop domain, access token and API version
//! - An async GraphQL client that sends documents with bound variables
//! - [`CustomerService`], which lists the first page of customers and
//!   creates or updates a customer from a submission
//!
//! ## Quick Start
//!
//! ```rust
//! use customer_sync::{AccessToken, ApiVersion, CustomerService, ShopDomain, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_123").unwrap())
//!     .api_version(ApiVersion::default())
//!     .build()
//!     .unwrap();
//!
//! let service = CustomerService::new(&config);
//! ```
//!
//! ## Listing and Saving Customers
//!
//! ```rust,ignore
//! use customer_sync::{CustomerService, CustomerSubmission, SubmitOutcome};
//!
//! // Reads SHOPIFY_DOMAIN and SHOPIFY_ACCESS_TOKEN
//! let service = CustomerService::from_env()?;
//!
//! let customers = service.list_customers().await?;
//!
//! // No customerId: creates a customer tagged "42"
//! let created = service
//!     .submit_customer(CustomerSubmission::new("Ada", "Lovelace", "ada@example.com"))
//!     .await?;
//!
//! // With the id: updates that customer
//! let mut edit = created.to_submission();
//! edit.last_name = "King".to_string();
//! let outcome = SubmitOutcome::from(service.submit_customer(edit).await);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Missing configuration is reported before any request
//! - **No string-built queries**: Input only ever travels as GraphQL variables
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod clients;
pub mod config;
pub mod customers;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiVersion, ConfigSource, EnvConfigSource, HostUrl, ShopDomain, ShopifyConfig,
    ShopifyConfigBuilder,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, GraphqlClient, GraphqlError, GraphqlTransport, HttpClient, HttpError, HttpMethod,
    HttpRequest, HttpRequestBuilder, HttpResponse, HttpResponseError, InvalidHttpRequestError,
};

// Re-export customer types
pub use customers::{
    Customer, CustomerError, CustomerId, CustomerOperation, CustomerService, CustomerSubmission,
    SubmitOutcome, UserError, UserErrors,
};
