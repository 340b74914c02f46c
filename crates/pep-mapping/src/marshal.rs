use pep_hessian::Value;
use pep_policy::{
    Action, Attribute, AttributeAssignment, Environment, Obligation, Request, Resource, Response,
    Result as PolicyResult, Status, StatusCode, Subject,
};

use crate::error::MappingError;
use crate::names::*;

/// Convert a policy [`Attribute`] into its Hessian wire representation.
pub fn marshal_attribute(attribute: &Attribute) -> Value {
    let mut entries = vec![(Value::string(FIELD_ID), Value::string(attribute.id.clone()))];
    if let Some(dt) = &attribute.datatype {
        entries.push((Value::string(FIELD_DATA_TYPE), Value::string(dt.clone())));
    }
    if let Some(issuer) = &attribute.issuer {
        entries.push((Value::string(FIELD_ISSUER), Value::string(issuer.clone())));
    }
    let values = attribute
        .values
        .iter()
        .map(|v| Value::string(v.clone()))
        .collect();
    entries.push((Value::string(FIELD_VALUES), Value::list(values)));
    Value::map(CLASS_ATTRIBUTE, entries)
}

/// Convert a policy [`Subject`] into its Hessian wire representation.
pub fn marshal_subject(subject: &Subject) -> Value {
    let mut entries = Vec::new();
    if let Some(category) = &subject.category {
        entries.push((Value::string(FIELD_CATEGORY), Value::string(category.clone())));
    }
    let attrs = subject.attributes.iter().map(marshal_attribute).collect();
    entries.push((Value::string(FIELD_ATTRIBUTES), Value::list(attrs)));
    Value::map(CLASS_SUBJECT, entries)
}

/// Convert a policy [`Resource`] into its Hessian wire representation.
pub fn marshal_resource(resource: &Resource) -> Value {
    let mut entries = Vec::new();
    if let Some(content) = &resource.content {
        entries.push((
            Value::string(FIELD_RESOURCE_CONTENT),
            Value::string(content.clone()),
        ));
    }
    let attrs = resource.attributes.iter().map(marshal_attribute).collect();
    entries.push((Value::string(FIELD_ATTRIBUTES), Value::list(attrs)));
    Value::map(CLASS_RESOURCE, entries)
}

/// Convert a policy [`Action`] into its Hessian wire representation.
pub fn marshal_action(action: &Action) -> Value {
    let attrs = action.attributes.iter().map(marshal_attribute).collect();
    Value::map(CLASS_ACTION, vec![(Value::string(FIELD_ATTRIBUTES), Value::list(attrs))])
}

/// Convert a policy [`Environment`] into its Hessian wire representation.
pub fn marshal_environment(environment: &Environment) -> Value {
    let attrs = environment
        .attributes
        .iter()
        .map(marshal_attribute)
        .collect();
    Value::map(
        CLASS_ENVIRONMENT,
        vec![(Value::string(FIELD_ATTRIBUTES), Value::list(attrs))],
    )
}

/// Convert a policy [`Request`] into its Hessian wire representation.
///
/// `action` and `environment` are emitted as an explicit Hessian `Null`
/// when absent rather than omitted from the map, unlike every other
/// optional field in this model.
pub fn marshal_request(request: &Request) -> Value {
    let subjects = request.subjects.iter().map(marshal_subject).collect();
    let resources = request.resources.iter().map(marshal_resource).collect();
    let action = request
        .action
        .as_ref()
        .map(marshal_action)
        .unwrap_or(Value::Null);
    let environment = request
        .environment
        .as_ref()
        .map(marshal_environment)
        .unwrap_or(Value::Null);
    Value::map(
        CLASS_REQUEST,
        vec![
            (Value::string(FIELD_SUBJECTS), Value::list(subjects)),
            (Value::string(FIELD_RESOURCES), Value::list(resources)),
            (Value::string(FIELD_ACTION), action),
            (Value::string(FIELD_ENVIRONMENT), environment),
        ],
    )
}

/// Convert a policy [`StatusCode`] into its Hessian wire representation.
pub fn marshal_status_code(status_code: &StatusCode) -> Value {
    let mut entries = vec![(Value::string(FIELD_CODE), Value::string(status_code.value.clone()))];
    if let Some(sub) = &status_code.sub_code {
        entries.push((Value::string(FIELD_SUB_CODE), marshal_status_code(sub)));
    }
    Value::map(CLASS_STATUS_CODE, entries)
}

/// Convert a policy [`Status`] into its Hessian wire representation.
pub fn marshal_status(status: &Status) -> Value {
    let mut entries = Vec::new();
    if let Some(message) = &status.message {
        entries.push((Value::string(FIELD_MESSAGE), Value::string(message.clone())));
    }
    if let Some(code) = &status.status_code {
        entries.push((Value::string(FIELD_STATUS_CODE), marshal_status_code(code)));
    }
    Value::map(CLASS_STATUS, entries)
}

/// Convert a policy [`AttributeAssignment`] into its Hessian wire
/// representation.
///
/// Returns [`MappingError::MissingId`] if `assignment.id` is still `None`
/// — marshaling requires a real id even though construction does not.
pub fn marshal_attribute_assignment(
    assignment: &AttributeAssignment,
) -> std::result::Result<Value, MappingError> {
    let id = assignment.id.clone().ok_or(MappingError::MissingId)?;
    let mut entries = vec![(Value::string(FIELD_ATTRIBUTE_ID), Value::string(id))];
    if let Some(dt) = &assignment.datatype {
        entries.push((Value::string(FIELD_DATA_TYPE), Value::string(dt.clone())));
    }
    if let Some(value) = &assignment.value {
        entries.push((Value::string(FIELD_VALUE), Value::string(value.clone())));
    }
    Ok(Value::map(CLASS_ATTRIBUTE_ASSIGNMENT, entries))
}

/// Convert a policy [`Obligation`] into its Hessian wire representation.
pub fn marshal_obligation(obligation: &Obligation) -> std::result::Result<Value, MappingError> {
    let assignments = obligation
        .attribute_assignments
        .iter()
        .map(marshal_attribute_assignment)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Value::map(
        CLASS_OBLIGATION,
        vec![
            (Value::string(FIELD_ID), Value::string(obligation.id.clone())),
            (
                Value::string(FIELD_FULFILL_ON),
                Value::Int32(obligation.fulfill_on.wire_value()),
            ),
            (
                Value::string(FIELD_ATTRIBUTE_ASSIGNMENTS),
                Value::list(assignments),
            ),
        ],
    ))
}

/// Convert a policy [`PolicyResult`] into its Hessian wire representation.
pub fn marshal_result(result: &PolicyResult) -> std::result::Result<Value, MappingError> {
    let mut entries = vec![(
        Value::string(FIELD_DECISION),
        Value::Int32(result.decision.wire_value()),
    )];
    if let Some(resource_id) = &result.resource_id {
        entries.push((
            Value::string(FIELD_RESOURCE_ID),
            Value::string(resource_id.clone()),
        ));
    }
    if let Some(status) = &result.status {
        entries.push((Value::string(FIELD_STATUS), marshal_status(status)));
    }
    let obligations = result
        .obligations
        .iter()
        .map(marshal_obligation)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    entries.push((Value::string(FIELD_OBLIGATIONS), Value::list(obligations)));
    Ok(Value::map(CLASS_RESULT, entries))
}

/// Convert a policy [`Response`] into its Hessian wire representation.
pub fn marshal_response(response: &Response) -> std::result::Result<Value, MappingError> {
    let mut entries = Vec::new();
    if let Some(request) = &response.request {
        entries.push((Value::string(FIELD_REQUEST), marshal_request(request)));
    }
    let results = response
        .results
        .iter()
        .map(marshal_result)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    entries.push((Value::string(FIELD_RESULTS), Value::list(results)));
    Ok(Value::map(CLASS_RESPONSE, entries))
}
