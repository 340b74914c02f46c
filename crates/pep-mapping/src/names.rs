//! Wire-exact class-name and field-key string constants. These strings are
//! part of the compatibility contract with the remote service and must
//! never be altered.

pub const CLASS_ATTRIBUTE: &str = "org.glite.authz.common.model.Attribute";
pub const CLASS_SUBJECT: &str = "org.glite.authz.common.model.Subject";
pub const CLASS_RESOURCE: &str = "org.glite.authz.common.model.Resource";
pub const CLASS_ACTION: &str = "org.glite.authz.common.model.Action";
pub const CLASS_ENVIRONMENT: &str = "org.glite.authz.common.model.Environment";
pub const CLASS_REQUEST: &str = "org.glite.authz.common.model.Request";
pub const CLASS_RESPONSE: &str = "org.glite.authz.common.model.Response";
pub const CLASS_RESULT: &str = "org.glite.authz.common.model.Result";
pub const CLASS_STATUS: &str = "org.glite.authz.common.model.Status";
pub const CLASS_STATUS_CODE: &str = "org.glite.authz.common.model.StatusCode";
pub const CLASS_OBLIGATION: &str = "org.glite.authz.common.model.Obligation";
pub const CLASS_ATTRIBUTE_ASSIGNMENT: &str = "org.glite.authz.common.model.AttributeAssignment";

pub const FIELD_ID: &str = "id";
pub const FIELD_DATA_TYPE: &str = "dataType";
pub const FIELD_ISSUER: &str = "issuer";
pub const FIELD_VALUES: &str = "values";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_ATTRIBUTES: &str = "attributes";
pub const FIELD_RESOURCE_CONTENT: &str = "resourceContent";
pub const FIELD_SUBJECTS: &str = "subjects";
pub const FIELD_RESOURCES: &str = "resources";
pub const FIELD_ACTION: &str = "action";
pub const FIELD_ENVIRONMENT: &str = "environment";
pub const FIELD_CODE: &str = "code";
pub const FIELD_SUB_CODE: &str = "subCode";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_STATUS_CODE: &str = "statusCode";
pub const FIELD_ATTRIBUTE_ID: &str = "attributeId";
pub const FIELD_VALUE: &str = "value";
pub const FIELD_FULFILL_ON: &str = "fulfillOn";
pub const FIELD_ATTRIBUTE_ASSIGNMENTS: &str = "attributeAssignments";
pub const FIELD_DECISION: &str = "decision";
pub const FIELD_RESOURCE_ID: &str = "resourceId";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_OBLIGATIONS: &str = "obligations";
pub const FIELD_REQUEST: &str = "request";
pub const FIELD_RESULTS: &str = "results";
