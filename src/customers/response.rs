//! Typed views of the GraphQL response bodies.
//!
//! Bodies are deserialized into these shapes instead of being indexed
//! ad hoc, so a missing or mistyped field becomes
//! [`CustomerError::MalformedResponse`] rather than a silent `null`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::customers::{Customer, CustomerError, UserError, UserErrors};

/// `{ "data": ..., "errors": [...] }`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CustomersData {
    customers: Connection<Customer>,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
struct CustomerCreateData {
    #[serde(rename = "customerCreate")]
    payload: Option<MutationPayload>,
}

#[derive(Debug, Deserialize)]
struct CustomerUpdateData {
    #[serde(rename = "customerUpdate")]
    payload: Option<MutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutationPayload {
    customer: Option<Customer>,
    user_errors: Vec<UserError>,
}

/// Which mutation produced a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MutationKind {
    Create,
    Update,
}

impl MutationKind {
    pub(crate) const fn field_name(self) -> &'static str {
        match self {
            Self::Create => "customerCreate",
            Self::Update => "customerUpdate",
        }
    }
}

/// Unwraps the envelope, turning top-level GraphQL errors and a missing
/// `data` into errors.
fn unwrap_data<T: DeserializeOwned>(body: Value) -> Result<T, CustomerError> {
    let envelope: Envelope<T> = serde_json::from_value(body)
        .map_err(|e| CustomerError::malformed(format!("unexpected body shape: {e}")))?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        tracing::warn!("Shopify GraphQL errors: {}", messages.join("; "));
        return Err(CustomerError::Upstream { messages });
    }

    envelope
        .data
        .ok_or_else(|| CustomerError::malformed("response has no data"))
}

/// Flattens `data.customers.edges[].node`, preserving order.
pub(crate) fn parse_customers(body: Value) -> Result<Vec<Customer>, CustomerError> {
    let data: CustomersData = unwrap_data(body)?;
    Ok(data
        .customers
        .edges
        .into_iter()
        .map(|edge| edge.node)
        .collect())
}

/// Extracts the confirmed customer, or the reported user errors.
pub(crate) fn parse_mutation(kind: MutationKind, body: Value) -> Result<Customer, CustomerError> {
    let payload = match kind {
        MutationKind::Create => unwrap_data::<CustomerCreateData>(body)?.payload,
        MutationKind::Update => unwrap_data::<CustomerUpdateData>(body)?.payload,
    }
    .ok_or_else(|| CustomerError::malformed(format!("data.{} is null", kind.field_name())))?;

    if let Some(errors) = UserErrors::from_vec(payload.user_errors) {
        return Err(CustomerError::UserErrors(errors));
    }

    payload.customer.ok_or_else(|| {
        CustomerError::malformed(format!(
            "data.{}.customer is null without userErrors",
            kind.field_name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(n: u32) -> Value {
        json!({
            "node": {
                "id": format!("gid://shopify/Customer/{n}"),
                "firstName": format!("First{n}"),
                "lastName": format!("Last{n}"),
                "email": format!("c{n}@example.com")
            }
        })
    }

    #[test]
    fn test_parse_customers_preserves_edge_order() {
        for count in [0_u32, 1, 3, 10] {
            let edges: Vec<Value> = (1..=count).rev().map(node).collect();
            let body = json!({ "data": { "customers": { "edges": edges } } });

            let customers = parse_customers(body).unwrap();

            assert_eq!(customers.len(), count as usize);
            let ids: Vec<_> = customers.iter().map(|c| c.id.as_str().to_string()).collect();
            let expected: Vec<_> = (1..=count)
                .rev()
                .map(|n| format!("gid://shopify/Customer/{n}"))
                .collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn test_parse_customers_missing_edges_is_malformed() {
        for body in [
            json!({}),
            json!({ "data": null }),
            json!({ "data": {} }),
            json!({ "data": { "customers": {} } }),
            json!({ "data": { "customers": { "edges": [{ "node": { "email": "x" } }] } } }),
            json!("not an object"),
        ] {
            assert!(
                matches!(
                    parse_customers(body.clone()),
                    Err(CustomerError::MalformedResponse { .. })
                ),
                "{body} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_customers_surfaces_graphql_errors() {
        let body = json!({
            "data": null,
            "errors": [{ "message": "Access denied for customers field." }]
        });

        match parse_customers(body) {
            Err(CustomerError::Upstream { messages }) => {
                assert_eq!(messages, ["Access denied for customers field."]);
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_mutation_returns_confirmed_customer() {
        let body = json!({
            "data": {
                "customerUpdate": {
                    "customer": {
                        "id": "gid://shopify/Customer/7",
                        "firstName": "Ada",
                        "lastName": "Lovelace",
                        "email": "ada@example.com"
                    },
                    "userErrors": []
                }
            }
        });

        let customer = parse_mutation(MutationKind::Update, body).unwrap();

        assert_eq!(customer.id.as_str(), "gid://shopify/Customer/7");
        assert_eq!(customer.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_parse_mutation_prefers_user_errors() {
        let body = json!({
            "data": {
                "customerCreate": {
                    "customer": null,
                    "userErrors": [
                        { "field": ["email"], "message": "Email has already been taken" },
                        { "field": ["phone"], "message": "Phone is invalid" }
                    ]
                }
            }
        });

        let error = parse_mutation(MutationKind::Create, body).unwrap_err();

        let errors = error.user_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first().field_name().as_deref(), Some("email"));
        assert_eq!(errors.first().message, "Email has already been taken");
    }

    #[test]
    fn test_parse_mutation_checks_the_matching_payload() {
        let body = json!({
            "data": {
                "customerCreate": {
                    "customer": { "id": "gid://shopify/Customer/1" },
                    "userErrors": []
                }
            }
        });

        assert!(matches!(
            parse_mutation(MutationKind::Update, body),
            Err(CustomerError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_parse_mutation_null_customer_without_errors_is_malformed() {
        let body = json!({
            "data": { "customerCreate": { "customer": null, "userErrors": [] } }
        });

        assert!(matches!(
            parse_mutation(MutationKind::Create, body),
            Err(CustomerError::MalformedResponse { .. })
        ));
    }
}
