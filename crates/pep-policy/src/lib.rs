//! The authorization policy object model: a tree of entity kinds (Request,
//! Subject, Resource, Action, Environment, Attribute, Response, Result,
//! Status, StatusCode, Obligation, AttributeAssignment) with strictly
//! tree-shaped exclusive ownership.
//!
//! Ownership falls directly out of Rust's move semantics: every container
//! below owns its children via `Vec<T>`/`Box<T>`/`Option<T>`, so dropping a
//! container recursively drops its descendants without any manual
//! destructor dispatch. `#[derive(Clone)]` on every entity gives the "deep
//! copy" the model requires (owned `String`/`Vec` fields are never
//! shallow-copied by a derived `Clone`).

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// A named attribute with an ordered (possibly empty, possibly duplicated)
/// list of string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribute {
    /// Mandatory attribute identifier (a well-known URI in practice).
    pub id: String,
    /// Optional XACML datatype URI.
    pub datatype: Option<String>,
    /// Optional issuer string.
    pub issuer: Option<String>,
    /// Ordered values; order must be preserved across marshal/unmarshal.
    pub values: Vec<String>,
}

impl Attribute {
    /// Construct an attribute with no values yet.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            datatype: None,
            issuer: None,
            values: Vec::new(),
        }
    }

    /// Builder-style datatype setter.
    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    /// Builder-style single-value setter (appends).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }
}

/// A single `(id, datatype, value)` triple attached to an [`Obligation`].
///
/// Unlike [`Attribute::id`], `id` here is `Option<String>` because the
/// original allows a freshly-constructed assignment to have no id yet
/// (deserialization-time placeholder); [`pep-mapping`] rejects marshaling an
/// assignment whose id is still `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeAssignment {
    /// Attribute identifier; `None` only during partial construction.
    pub id: Option<String>,
    /// Optional XACML datatype URI.
    pub datatype: Option<String>,
    /// Single scalar value.
    pub value: Option<String>,
}

impl AttributeAssignment {
    /// Construct a fully-formed assignment.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            datatype: None,
            value: Some(value.into()),
        }
    }
}

/// The entity making the access request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subject {
    /// Optional well-known subject-category URI.
    pub category: Option<String>,
    /// Ordered attributes describing the subject.
    pub attributes: Vec<Attribute>,
}

/// The entity being accessed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    /// Optional free-form resource content.
    pub content: Option<String>,
    /// Ordered attributes describing the resource.
    pub attributes: Vec<Attribute>,
}

/// The operation being requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Action {
    /// Ordered attributes describing the action.
    pub attributes: Vec<Attribute>,
}

/// Ambient attributes not tied to subject/resource/action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Ordered attributes describing the environment.
    pub attributes: Vec<Attribute>,
}

/// A full authorization query: subjects, resources, and an optional single
/// action and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// One or more subjects making the request.
    pub subjects: Vec<Subject>,
    /// One or more resources being accessed.
    pub resources: Vec<Resource>,
    /// The action being requested, if any.
    pub action: Option<Action>,
    /// The ambient environment, if any.
    pub environment: Option<Environment>,
}

/// A single node in a finite chain of nested status codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCode {
    /// The status code's URI value.
    pub value: String,
    /// An optional nested status code.
    pub sub_code: Option<Box<StatusCode>>,
}

impl StatusCode {
    /// Construct a leaf status code with no sub-code.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            sub_code: None,
        }
    }
}

/// Human- and machine-readable status accompanying a [`Result`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    /// Optional human-readable message.
    pub message: Option<String>,
    /// Optional structured status code.
    pub status_code: Option<StatusCode>,
}

/// An obligation's attachment condition: which decision outcome it applies
/// to. Wire values match the enum order: `Deny` = 0, `Permit` = 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FulfillOn {
    /// Fulfill only when the decision is Deny.
    #[default]
    Deny,
    /// Fulfill only when the decision is Permit.
    Permit,
}

impl FulfillOn {
    /// The Hessian wire-value integer for this variant.
    pub fn wire_value(self) -> i32 {
        match self {
            FulfillOn::Deny => 0,
            FulfillOn::Permit => 1,
        }
    }

    /// Map a wire-value integer back to a variant; `None` if out of range.
    pub fn from_wire_value(v: i32) -> Option<Self> {
        match v {
            0 => Some(FulfillOn::Deny),
            1 => Some(FulfillOn::Permit),
            _ => None,
        }
    }
}

/// A directive the PEP must honor before acting on a decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Obligation {
    /// Mandatory obligation identifier.
    pub id: String,
    /// Which decision outcome this obligation attaches to.
    pub fulfill_on: FulfillOn,
    /// Ordered attribute assignments carried by the obligation.
    pub attribute_assignments: Vec<AttributeAssignment>,
}

impl Obligation {
    /// Construct an obligation with no assignments yet.
    pub fn new(id: impl Into<String>, fulfill_on: FulfillOn) -> Self {
        Self {
            id: id.into(),
            fulfill_on,
            attribute_assignments: Vec::new(),
        }
    }
}

/// The authorization decision. Wire values match enum declaration order:
/// `Deny` = 0, `Permit` = 1, `Indeterminate` = 2, `NotApplicable` = 3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Decision {
    /// Access is denied.
    #[default]
    Deny,
    /// Access is permitted.
    Permit,
    /// The PDP could not reach a decision.
    Indeterminate,
    /// No applicable policy was found.
    NotApplicable,
}

impl Decision {
    /// The Hessian wire-value integer for this variant.
    pub fn wire_value(self) -> i32 {
        match self {
            Decision::Deny => 0,
            Decision::Permit => 1,
            Decision::Indeterminate => 2,
            Decision::NotApplicable => 3,
        }
    }

    /// Map a wire-value integer back to a variant; `None` if out of range.
    pub fn from_wire_value(v: i32) -> Option<Self> {
        match v {
            0 => Some(Decision::Deny),
            1 => Some(Decision::Permit),
            2 => Some(Decision::Indeterminate),
            3 => Some(Decision::NotApplicable),
            _ => None,
        }
    }

    /// True for [`Decision::Permit`]; used by the post-processor chain to
    /// decide whether to run permit-only obligation handling.
    pub fn is_permit(self) -> bool {
        matches!(self, Decision::Permit)
    }
}

/// One resource-scoped decision within a [`Response`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Result {
    /// The authorization decision.
    pub decision: Decision,
    /// Optional identifier of the resource this result concerns.
    pub resource_id: Option<String>,
    /// Optional status detail.
    pub status: Option<Status>,
    /// Ordered obligations attached to this result.
    pub obligations: Vec<Obligation>,
}

/// The PDP's reply: zero or more [`Result`]s and an optional echo of the
/// request it actually evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// The effective request, as the PDP evaluated it, if echoed back.
    pub request: Option<Request>,
    /// Ordered per-resource results.
    pub results: Vec<Result>,
}

impl Response {
    /// Transfer ownership of the echoed effective request out to the
    /// caller, nulling the field in place. Returns `None` if no request was
    /// echoed.
    pub fn relinquish_request(&mut self) -> Option<Request> {
        self.request.take()
    }
}
