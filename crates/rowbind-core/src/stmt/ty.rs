/// The type of a host value.
///
/// Nullability is not part of the type: `Option<i64>` and `i64` both have the
/// type [`Type::I64`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 16-bit integer
    I16,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// 32-bit floating point
    F32,

    /// 64-bit floating point
    F64,

    /// String type
    String,

    /// Opaque byte string
    Bytes,

    /// UUID
    Uuid,

    /// An instant in time, normalized to UTC
    Timestamp,

    /// A date and time without a time zone
    DateTime,

    /// A calendar date
    Date,

    /// A time of day
    Time,

    /// A list of a single type
    List(Box<Type>),

    /// Any type. Coercing to `Any` never changes a value.
    Any,
}

impl Type {
    pub fn list(ty: impl Into<Self>) -> Self {
        Self::List(Box::new(ty.into()))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns the element type when `self` is a list.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Self::List(item) => Some(item),
            _ => None,
        }
    }

    /// Returns the type with list element types erased.
    ///
    /// Coercers are registered against erased types, so a single list coercer
    /// serves every element type.
    pub fn erased(&self) -> Type {
        match self {
            Self::List(_) => Self::list(Type::Any),
            ty => ty.clone(),
        }
    }

    /// Returns `true` for the integer types.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::I16 | Self::I32 | Self::I64)
    }
}
