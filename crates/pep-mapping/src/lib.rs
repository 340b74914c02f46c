//! Bidirectional conversion between the policy object model
//! ([`pep_policy`]) and Hessian wire values ([`pep_hessian::Value`]), using
//! the wire-exact class-name and field-key strings the remote service
//! expects.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod marshal;
pub mod names;
mod unmarshal;

pub use error::MappingError;
pub use marshal::{
    marshal_action, marshal_attribute, marshal_attribute_assignment, marshal_environment,
    marshal_obligation, marshal_request, marshal_resource, marshal_response, marshal_result,
    marshal_status, marshal_status_code, marshal_subject,
};
pub use unmarshal::{
    unmarshal_action, unmarshal_attribute, unmarshal_attribute_assignment, unmarshal_environment,
    unmarshal_obligation, unmarshal_request, unmarshal_resource, unmarshal_response,
    unmarshal_result, unmarshal_status, unmarshal_status_code, unmarshal_subject,
};

#[cfg(test)]
mod tests {
    use super::*;
    use pep_hessian::Value;
    use pep_policy::{
        Action, Attribute, AttributeAssignment, Decision, Environment, FulfillOn, Obligation,
        Request, Resource, Response, Result as PolicyResult, Status, StatusCode, Subject,
    };

    fn minimal_permit_request() -> Request {
        Request {
            subjects: vec![Subject {
                category: None,
                attributes: vec![Attribute {
                    id: "urn:oasis:names:tc:xacml:1.0:subject:subject-id".to_string(),
                    datatype: Some("urn:oasis:names:tc:xacml:1.0:data-type:x500Name".to_string()),
                    issuer: None,
                    values: vec!["CN=Alice".to_string()],
                }],
            }],
            resources: vec![Resource {
                content: None,
                attributes: vec![Attribute {
                    id: "urn:oasis:names:tc:xacml:1.0:resource:resource-id".to_string(),
                    datatype: None,
                    issuer: None,
                    values: vec!["svc1".to_string()],
                }],
            }],
            action: Some(Action {
                attributes: vec![Attribute {
                    id: "urn:oasis:names:tc:xacml:1.0:action:action-id".to_string(),
                    datatype: None,
                    issuer: None,
                    values: vec!["read".to_string()],
                }],
            }),
            environment: None,
        }
    }

    #[test]
    fn request_roundtrips() {
        let request = minimal_permit_request();
        let wire = marshal_request(&request);
        let back = unmarshal_request(&wire).unwrap();
        assert_eq!(request, back);
    }

    #[test]
    fn request_marshal_puts_null_for_absent_action_and_environment() {
        let mut request = minimal_permit_request();
        request.action = None;
        let wire = marshal_request(&request);
        let (_, entries) = wire.as_map().unwrap();
        let action_entry = entries.iter().find(|(k, _)| k.as_string() == Some("action")).unwrap();
        assert_eq!(action_entry.1, Value::Null);
        let env_entry = entries
            .iter()
            .find(|(k, _)| k.as_string() == Some("environment"))
            .unwrap();
        assert_eq!(env_entry.1, Value::Null);
    }

    #[test]
    fn attribute_omits_absent_optional_scalars() {
        let attribute = Attribute::new("id").with_value("v");
        let wire = marshal_attribute(&attribute);
        let (_, entries) = wire.as_map().unwrap();
        assert!(!entries.iter().any(|(k, _)| k.as_string() == Some("dataType")));
        assert!(!entries.iter().any(|(k, _)| k.as_string() == Some("issuer")));
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let wrong = Value::map(names::CLASS_SUBJECT, vec![]);
        let err = unmarshal_attribute(&wrong).unwrap_err();
        assert!(matches!(err, MappingError::TypeMismatch { .. }));
    }

    #[test]
    fn null_top_level_request_is_an_error() {
        let err = unmarshal_request(&Value::Null).unwrap_err();
        assert!(matches!(err, MappingError::NullRequest));
    }

    #[test]
    fn marshal_attribute_assignment_without_id_is_an_error() {
        let assignment = AttributeAssignment {
            id: None,
            datatype: None,
            value: Some("1000".to_string()),
        };
        let err = marshal_attribute_assignment(&assignment).unwrap_err();
        assert!(matches!(err, MappingError::MissingId));
    }

    /// Legacy AttributeAssignment scenario: a Map carrying `attributeId` and
    /// a `values` List (instead of the scalar `value` key) unmarshals to a
    /// single value taken from that list.
    #[test]
    fn legacy_values_list_is_accepted_on_unmarshal() {
        let wire = Value::map(
            names::CLASS_ATTRIBUTE_ASSIGNMENT,
            vec![
                (Value::string("attributeId"), Value::string("posix-uid")),
                (Value::string("values"), Value::list(vec![Value::string("1000")])),
            ],
        );
        let assignment = unmarshal_attribute_assignment(&wire).unwrap();
        assert_eq!(assignment.id.as_deref(), Some("posix-uid"));
        assert_eq!(assignment.value.as_deref(), Some("1000"));
    }

    /// A multi-element legacy `values` list assigns each element to `value`
    /// in order, so the *last* element wins, not the first.
    #[test]
    fn legacy_values_list_with_multiple_elements_takes_the_last() {
        let wire = Value::map(
            names::CLASS_ATTRIBUTE_ASSIGNMENT,
            vec![
                (Value::string("attributeId"), Value::string("posix-uid")),
                (
                    Value::string("values"),
                    Value::list(vec![
                        Value::string("1000"),
                        Value::string("1001"),
                        Value::string("1002"),
                    ]),
                ),
            ],
        );
        let assignment = unmarshal_attribute_assignment(&wire).unwrap();
        assert_eq!(assignment.value.as_deref(), Some("1002"));
    }

    #[test]
    fn out_of_range_decision_is_an_error() {
        let wire = Value::map(
            names::CLASS_RESULT,
            vec![
                (Value::string("decision"), Value::Int32(99)),
                (Value::string("obligations"), Value::list(vec![])),
            ],
        );
        let err = unmarshal_result(&wire).unwrap_err();
        assert!(matches!(err, MappingError::EnumOutOfRange { .. }));
    }

    #[test]
    fn response_roundtrips_with_obligation_and_status() {
        let response = Response {
            request: None,
            results: vec![PolicyResult {
                decision: Decision::Permit,
                resource_id: Some("svc1".to_string()),
                status: Some(Status {
                    message: Some("ok".to_string()),
                    status_code: Some(StatusCode::new("urn:oasis:names:tc:xacml:1.0:status:ok")),
                }),
                obligations: vec![Obligation {
                    id: "urn:posix-account-map".to_string(),
                    fulfill_on: FulfillOn::Permit,
                    attribute_assignments: vec![AttributeAssignment::new("posix-uid", "1000")],
                }],
            }],
        };
        let wire = marshal_response(&response).unwrap();
        let back = unmarshal_response(&wire).unwrap();
        assert_eq!(response, back);
    }

    #[test]
    fn response_echoing_request_roundtrips() {
        let response = Response {
            request: Some(minimal_permit_request()),
            results: vec![],
        };
        let wire = marshal_response(&response).unwrap();
        let back = unmarshal_response(&wire).unwrap();
        assert_eq!(response, back);
    }

    #[test]
    fn unknown_field_key_is_skipped_not_an_error() {
        let wire = Value::map(
            names::CLASS_ACTION,
            vec![
                (Value::string("attributes"), Value::list(vec![])),
                (Value::string("futureField"), Value::string("ignored")),
            ],
        );
        let action = unmarshal_action(&wire).unwrap();
        assert!(action.attributes.is_empty());
    }
}
