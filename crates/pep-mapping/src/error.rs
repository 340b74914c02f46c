use pep_hessian::Value;

/// An error converting between the policy object model and Hessian values.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// A Map's type name did not match the class name expected at this
    /// position in the tree.
    #[error("expected map of type {expected}, got {actual:?}")]
    TypeMismatch {
        /// The wire-exact class name expected here.
        expected: &'static str,
        /// The type name actually found, if any.
        actual: Option<String>,
    },

    /// The value at this position was not a Map at all.
    #[error("expected a map, got {actual:?}")]
    NotAMap {
        /// The value that was found instead of a Map.
        actual: Value,
    },

    /// A mandatory field was absent or Null.
    #[error("missing mandatory field {field:?} in {class}")]
    MissingField {
        /// The class being unmarshaled.
        class: &'static str,
        /// The missing field's wire key.
        field: &'static str,
    },

    /// A field's value was not the type expected for that field.
    #[error("field {field:?} in {class} had unexpected wire shape")]
    UnexpectedFieldShape {
        /// The class being unmarshaled.
        class: &'static str,
        /// The field whose shape was wrong.
        field: &'static str,
    },

    /// An Int32 enum field (`decision`, `fulfillOn`) was out of range.
    #[error("value {value} is out of range for enum field {field:?}")]
    EnumOutOfRange {
        /// The field carrying the enum.
        field: &'static str,
        /// The out-of-range wire value.
        value: i32,
    },

    /// An `AttributeAssignment` was marshaled with its id still unset.
    ///
    /// `pep_policy::AttributeAssignment::id` may be `None` during
    /// construction, but a well-formed wire assignment always has one.
    #[error("cannot marshal an AttributeAssignment with no id")]
    MissingId,

    /// The top-level Request passed to `marshal_request` or produced by
    /// `unmarshal_request` was Null; the Request is mandatory, never
    /// optional, at the root of the tree.
    #[error("top-level Request is null")]
    NullRequest,
}
