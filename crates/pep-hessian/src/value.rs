//! The Hessian value model: a single tagged `enum` over the 13 Hessian
//! value kinds, replacing the original's vtable-of-function-pointers
//! polymorphism with a sum type the compiler can exhaustively match over.

/// A Hessian-encodable value.
///
/// Container variants ([`Value::List`] and [`Value::Map`]) own their
/// children outright; dropping a container drops its whole subtree. This
/// falls directly out of Rust's ownership rules and needs no manual
/// destructor dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The Hessian null value.
    Null,
    /// A boolean.
    Boolean(bool),
    /// A 32-bit signed integer.
    Int32(i32),
    /// A 64-bit signed integer.
    Int64(i64),
    /// An IEEE-754 binary64 float, compared bit-exactly by [`PartialEq`].
    Double(f64),
    /// A date, as milliseconds since the Unix epoch.
    Date(i64),
    /// A UTF-8 string, counted in characters on the wire.
    String(String),
    /// An XML document, wire-identical to [`Value::String`] but tagged
    /// distinctly.
    Xml(String),
    /// An opaque binary blob.
    Binary(Vec<u8>),
    /// A remote reference: a type name and a URL.
    Remote {
        /// The type name of the referenced remote object.
        r#type: String,
        /// The URL of the referenced remote object.
        url: String,
    },
    /// A list, optionally typed, preserving insertion order.
    List {
        /// Optional type name.
        r#type: Option<String>,
        /// Elements in wire order.
        elements: Vec<Value>,
    },
    /// A map, typed by a class-name string, preserving entry order.
    Map {
        /// The map's type name (the policy-object class name when this map
        /// represents a policy entity).
        r#type: Option<String>,
        /// Key/value entries in wire order.
        entries: Vec<(Value, Value)>,
    },
    /// A back-reference to an earlier element within the enclosing List or
    /// Map's local reference table. Never observed outside the codec: by
    /// the time a container finishes deserializing, every `Ref` has been
    /// resolved into a direct value (or resolution has failed).
    Ref(i32),
}

impl Value {
    /// `Some(b)` if this is a [`Value::Boolean`], else `None`.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// `Some(i)` if this is a [`Value::Int32`], else `None`.
    pub fn as_int32(&self) -> Option<i32> {
        match self {
            Value::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// `Some(i)` if this is a [`Value::Int64`], else `None`.
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// `Some(s)` if this is a [`Value::String`], else `None`.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// `Some((type, entries))` if this is a [`Value::Map`], else `None`.
    pub fn as_map(&self) -> Option<(Option<&str>, &[(Value, Value)])> {
        match self {
            Value::Map { r#type, entries } => Some((r#type.as_deref(), entries)),
            _ => None,
        }
    }

    /// `Some(elements)` if this is a [`Value::List`], else `None`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List { elements, .. } => Some(elements),
            _ => None,
        }
    }

    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Build an untyped String value.
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Build a typed Map value from an ordered list of entries.
    pub fn map(type_name: impl Into<String>, entries: Vec<(Value, Value)>) -> Self {
        Value::Map {
            r#type: Some(type_name.into()),
            entries,
        }
    }

    /// Build an untyped List value.
    pub fn list(elements: Vec<Value>) -> Self {
        Value::List {
            r#type: None,
            elements,
        }
    }
}
