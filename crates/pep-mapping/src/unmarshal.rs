use pep_hessian::Value;
use pep_policy::{
    Action, Attribute, AttributeAssignment, Decision, Environment, FulfillOn, Obligation, Request,
    Resource, Response, Result as PolicyResult, Status, StatusCode, Subject,
};

use crate::error::MappingError;
use crate::names::*;

type Entries<'a> = &'a [(Value, Value)];

fn as_map_checked<'a>(
    value: &'a Value,
    expected: &'static str,
) -> std::result::Result<Entries<'a>, MappingError> {
    match value.as_map() {
        Some((Some(actual), entries)) if actual == expected => Ok(entries),
        Some((actual, _)) => Err(MappingError::TypeMismatch {
            expected,
            actual: actual.map(str::to_string),
        }),
        None => Err(MappingError::NotAMap {
            actual: value.clone(),
        }),
    }
}

fn field<'a>(entries: Entries<'a>, key: &str) -> Option<&'a Value> {
    entries
        .iter()
        .find(|(k, _)| k.as_string() == Some(key))
        .map(|(_, v)| v)
}

fn warn_unknown_fields(class: &'static str, entries: Entries, known: &[&str]) {
    for (key, _) in entries {
        let Some(key) = key.as_string() else { continue };
        if !known.contains(&key) {
            tracing::warn!(class, field = key, "unknown field key, skipping");
        }
    }
}

fn optional_string(entries: Entries, key: &str) -> Option<String> {
    field(entries, key).and_then(Value::as_string).map(str::to_string)
}

fn required_string(
    entries: Entries,
    class: &'static str,
    key: &'static str,
) -> std::result::Result<String, MappingError> {
    optional_string(entries, key).ok_or(MappingError::MissingField { class, field: key })
}

fn required_list<'a>(
    entries: Entries<'a>,
    class: &'static str,
    key: &'static str,
) -> std::result::Result<&'a [Value], MappingError> {
    field(entries, key)
        .and_then(Value::as_list)
        .ok_or(MappingError::MissingField { class, field: key })
}

/// Convert a Hessian wire value into a policy [`Attribute`].
pub fn unmarshal_attribute(value: &Value) -> std::result::Result<Attribute, MappingError> {
    let entries = as_map_checked(value, CLASS_ATTRIBUTE)?;
    warn_unknown_fields(
        CLASS_ATTRIBUTE,
        entries,
        &[FIELD_ID, FIELD_DATA_TYPE, FIELD_ISSUER, FIELD_VALUES],
    );
    let id = required_string(entries, CLASS_ATTRIBUTE, FIELD_ID)?;
    let datatype = optional_string(entries, FIELD_DATA_TYPE);
    let issuer = optional_string(entries, FIELD_ISSUER);
    let values = required_list(entries, CLASS_ATTRIBUTE, FIELD_VALUES)?
        .iter()
        .filter_map(Value::as_string)
        .map(str::to_string)
        .collect();
    Ok(Attribute {
        id,
        datatype,
        issuer,
        values,
    })
}

fn unmarshal_attribute_list(
    entries: Entries,
    class: &'static str,
) -> std::result::Result<Vec<Attribute>, MappingError> {
    required_list(entries, class, FIELD_ATTRIBUTES)?
        .iter()
        .map(unmarshal_attribute)
        .collect()
}

/// Convert a Hessian wire value into a policy [`Subject`].
pub fn unmarshal_subject(value: &Value) -> std::result::Result<Subject, MappingError> {
    let entries = as_map_checked(value, CLASS_SUBJECT)?;
    warn_unknown_fields(CLASS_SUBJECT, entries, &[FIELD_CATEGORY, FIELD_ATTRIBUTES]);
    Ok(Subject {
        category: optional_string(entries, FIELD_CATEGORY),
        attributes: unmarshal_attribute_list(entries, CLASS_SUBJECT)?,
    })
}

/// Convert a Hessian wire value into a policy [`Resource`].
pub fn unmarshal_resource(value: &Value) -> std::result::Result<Resource, MappingError> {
    let entries = as_map_checked(value, CLASS_RESOURCE)?;
    warn_unknown_fields(
        CLASS_RESOURCE,
        entries,
        &[FIELD_RESOURCE_CONTENT, FIELD_ATTRIBUTES],
    );
    Ok(Resource {
        content: optional_string(entries, FIELD_RESOURCE_CONTENT),
        attributes: unmarshal_attribute_list(entries, CLASS_RESOURCE)?,
    })
}

/// Convert a Hessian wire value into a policy [`Action`].
pub fn unmarshal_action(value: &Value) -> std::result::Result<Action, MappingError> {
    let entries = as_map_checked(value, CLASS_ACTION)?;
    warn_unknown_fields(CLASS_ACTION, entries, &[FIELD_ATTRIBUTES]);
    Ok(Action {
        attributes: unmarshal_attribute_list(entries, CLASS_ACTION)?,
    })
}

/// Convert a Hessian wire value into a policy [`Environment`].
pub fn unmarshal_environment(value: &Value) -> std::result::Result<Environment, MappingError> {
    let entries = as_map_checked(value, CLASS_ENVIRONMENT)?;
    warn_unknown_fields(CLASS_ENVIRONMENT, entries, &[FIELD_ATTRIBUTES]);
    Ok(Environment {
        attributes: unmarshal_attribute_list(entries, CLASS_ENVIRONMENT)?,
    })
}

/// Convert a Hessian wire value into a policy [`Request`].
///
/// The top-level Request is mandatory: passing [`Value::Null`] returns
/// [`MappingError::NullRequest`].
pub fn unmarshal_request(value: &Value) -> std::result::Result<Request, MappingError> {
    if value.is_null() {
        return Err(MappingError::NullRequest);
    }
    let entries = as_map_checked(value, CLASS_REQUEST)?;
    warn_unknown_fields(
        CLASS_REQUEST,
        entries,
        &[FIELD_SUBJECTS, FIELD_RESOURCES, FIELD_ACTION, FIELD_ENVIRONMENT],
    );
    let subjects = required_list(entries, CLASS_REQUEST, FIELD_SUBJECTS)?
        .iter()
        .map(unmarshal_subject)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let resources = required_list(entries, CLASS_REQUEST, FIELD_RESOURCES)?
        .iter()
        .map(unmarshal_resource)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let action = match field(entries, FIELD_ACTION) {
        Some(v) if !v.is_null() => Some(unmarshal_action(v)?),
        _ => None,
    };
    let environment = match field(entries, FIELD_ENVIRONMENT) {
        Some(v) if !v.is_null() => Some(unmarshal_environment(v)?),
        _ => None,
    };
    Ok(Request {
        subjects,
        resources,
        action,
        environment,
    })
}

/// Convert a Hessian wire value into a policy [`StatusCode`].
pub fn unmarshal_status_code(value: &Value) -> std::result::Result<StatusCode, MappingError> {
    let entries = as_map_checked(value, CLASS_STATUS_CODE)?;
    warn_unknown_fields(CLASS_STATUS_CODE, entries, &[FIELD_CODE, FIELD_SUB_CODE]);
    let code = required_string(entries, CLASS_STATUS_CODE, FIELD_CODE)?;
    let sub_code = match field(entries, FIELD_SUB_CODE) {
        Some(v) if !v.is_null() => Some(Box::new(unmarshal_status_code(v)?)),
        _ => None,
    };
    Ok(StatusCode {
        value: code,
        sub_code,
    })
}

/// Convert a Hessian wire value into a policy [`Status`].
pub fn unmarshal_status(value: &Value) -> std::result::Result<Status, MappingError> {
    let entries = as_map_checked(value, CLASS_STATUS)?;
    warn_unknown_fields(CLASS_STATUS, entries, &[FIELD_MESSAGE, FIELD_STATUS_CODE]);
    let message = optional_string(entries, FIELD_MESSAGE);
    let status_code = match field(entries, FIELD_STATUS_CODE) {
        Some(v) if !v.is_null() => Some(unmarshal_status_code(v)?),
        _ => None,
    };
    Ok(Status {
        message,
        status_code,
    })
}

/// Convert a Hessian wire value into a policy [`AttributeAssignment`].
///
/// Accepts the legacy `values` list key (a single-element List of String)
/// in place of the `value` scalar key, logging a deprecation warning, per
/// the format some deployed PDPs still emit.
pub fn unmarshal_attribute_assignment(
    value: &Value,
) -> std::result::Result<AttributeAssignment, MappingError> {
    let entries = as_map_checked(value, CLASS_ATTRIBUTE_ASSIGNMENT)?;
    warn_unknown_fields(
        CLASS_ATTRIBUTE_ASSIGNMENT,
        entries,
        &[FIELD_ATTRIBUTE_ID, FIELD_DATA_TYPE, FIELD_VALUE, FIELD_VALUES],
    );
    let id = required_string(entries, CLASS_ATTRIBUTE_ASSIGNMENT, FIELD_ATTRIBUTE_ID)?;
    let datatype = optional_string(entries, FIELD_DATA_TYPE);
    let assignment_value = match optional_string(entries, FIELD_VALUE) {
        Some(v) => Some(v),
        None => match field(entries, FIELD_VALUES).and_then(Value::as_list) {
            Some(list) => {
                tracing::warn!(
                    class = CLASS_ATTRIBUTE_ASSIGNMENT,
                    "legacy 'values' list field used in place of 'value'; deprecated"
                );
                list.last().and_then(Value::as_string).map(str::to_string)
            }
            None => None,
        },
    };
    Ok(AttributeAssignment {
        id: Some(id),
        datatype,
        value: assignment_value,
    })
}

/// Convert a Hessian wire value into a policy [`Obligation`].
pub fn unmarshal_obligation(value: &Value) -> std::result::Result<Obligation, MappingError> {
    let entries = as_map_checked(value, CLASS_OBLIGATION)?;
    warn_unknown_fields(
        CLASS_OBLIGATION,
        entries,
        &[FIELD_ID, FIELD_FULFILL_ON, FIELD_ATTRIBUTE_ASSIGNMENTS],
    );
    let id = required_string(entries, CLASS_OBLIGATION, FIELD_ID)?;
    let fulfill_on_raw = field(entries, FIELD_FULFILL_ON)
        .and_then(Value::as_int32)
        .ok_or(MappingError::MissingField {
            class: CLASS_OBLIGATION,
            field: FIELD_FULFILL_ON,
        })?;
    let fulfill_on =
        FulfillOn::from_wire_value(fulfill_on_raw).ok_or(MappingError::EnumOutOfRange {
            field: FIELD_FULFILL_ON,
            value: fulfill_on_raw,
        })?;
    let attribute_assignments = required_list(entries, CLASS_OBLIGATION, FIELD_ATTRIBUTE_ASSIGNMENTS)?
        .iter()
        .map(unmarshal_attribute_assignment)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Obligation {
        id,
        fulfill_on,
        attribute_assignments,
    })
}

/// Convert a Hessian wire value into a policy [`PolicyResult`].
pub fn unmarshal_result(value: &Value) -> std::result::Result<PolicyResult, MappingError> {
    let entries = as_map_checked(value, CLASS_RESULT)?;
    warn_unknown_fields(
        CLASS_RESULT,
        entries,
        &[FIELD_DECISION, FIELD_RESOURCE_ID, FIELD_STATUS, FIELD_OBLIGATIONS],
    );
    let decision_raw = field(entries, FIELD_DECISION)
        .and_then(Value::as_int32)
        .ok_or(MappingError::MissingField {
            class: CLASS_RESULT,
            field: FIELD_DECISION,
        })?;
    let decision = Decision::from_wire_value(decision_raw).ok_or(MappingError::EnumOutOfRange {
        field: FIELD_DECISION,
        value: decision_raw,
    })?;
    let resource_id = optional_string(entries, FIELD_RESOURCE_ID);
    let status = match field(entries, FIELD_STATUS) {
        Some(v) if !v.is_null() => Some(unmarshal_status(v)?),
        _ => None,
    };
    let obligations = match field(entries, FIELD_OBLIGATIONS).and_then(Value::as_list) {
        Some(list) => list
            .iter()
            .map(unmarshal_obligation)
            .collect::<std::result::Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    Ok(PolicyResult {
        decision,
        resource_id,
        status,
        obligations,
    })
}

/// Convert a Hessian wire value into a policy [`Response`].
pub fn unmarshal_response(value: &Value) -> std::result::Result<Response, MappingError> {
    let entries = as_map_checked(value, CLASS_RESPONSE)?;
    warn_unknown_fields(CLASS_RESPONSE, entries, &[FIELD_REQUEST, FIELD_RESULTS]);
    let request = match field(entries, FIELD_REQUEST) {
        Some(v) if !v.is_null() => Some(unmarshal_request(v)?),
        _ => None,
    };
    let results = match field(entries, FIELD_RESULTS).and_then(Value::as_list) {
        Some(list) => list
            .iter()
            .map(unmarshal_result)
            .collect::<std::result::Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    Ok(Response { request, results })
}
