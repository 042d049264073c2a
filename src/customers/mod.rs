//! Customer list and save operations.
//!
//! - [`CustomerService::list_customers`]: first page of customers
//! - [`CustomerService::submit_customer`]: create or update, depending on
//!   whether the submission carries a [`CustomerId`]
//! - [`SubmitOutcome`]: what the page renders after a save

mod customer;
mod errors;
mod outcome;
pub mod queries;
mod response;
mod service;

pub use customer::{form_fields, Customer, CustomerId, CustomerOperation, CustomerSubmission};
pub use errors::{CustomerError, UserError, UserErrors, GENERIC_FAILURE_MESSAGE};
pub use outcome::SubmitOutcome;
pub use queries::{CustomerInput, CREATED_CUSTOMER_TAG, PAGE_SIZE};
pub use service::CustomerService;
