use super::Type;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

/// A host value read from, or bound to, a database column.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 16-bit integer
    I16(i16),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// 32-bit floating point
    F32(f32),

    /// 64-bit floating point
    F64(f64),

    /// String value
    String(String),

    /// Byte string
    Bytes(Vec<u8>),

    /// UUID
    Uuid(Uuid),

    /// An instant in time
    Timestamp(DateTime<Utc>),

    /// A date and time without a time zone
    DateTime(NaiveDateTime),

    /// A calendar date
    Date(NaiveDate),

    /// A time of day
    Time(NaiveTime),

    /// A list of values of the same type
    List(Vec<Value>),

    /// Null value
    #[default]
    Null,
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    /// Returns the runtime type of the value.
    ///
    /// `Null` has no type of its own and reports [`Type::Any`]. A list reports
    /// the type of its first non-null item.
    pub fn ty(&self) -> Type {
        match self {
            Self::Bool(_) => Type::Bool,
            Self::I16(_) => Type::I16,
            Self::I32(_) => Type::I32,
            Self::I64(_) => Type::I64,
            Self::F32(_) => Type::F32,
            Self::F64(_) => Type::F64,
            Self::String(_) => Type::String,
            Self::Bytes(_) => Type::Bytes,
            Self::Uuid(_) => Type::Uuid,
            Self::Timestamp(_) => Type::Timestamp,
            Self::DateTime(_) => Type::DateTime,
            Self::Date(_) => Type::Date,
            Self::Time(_) => Type::Time,
            Self::List(items) => Type::list(
                items
                    .iter()
                    .find(|item| !item.is_null())
                    .map(Value::ty)
                    .unwrap_or(Type::Any),
            ),
            Self::Null => Type::Any,
        }
    }

    /// Returns `true` if the value is null or is an instance of `ty`.
    pub fn is_a(&self, ty: &Type) -> bool {
        match (self, ty) {
            (Self::Null, _) | (_, Type::Any) => true,
            (Self::List(items), Type::List(item_ty)) => items.iter().all(|item| item.is_a(item_ty)),
            (value, ty) => value.ty() == *ty,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I16(v) => Some(v as i64),
            Self::I32(v) => Some(v as i64),
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    /// Takes the value out, leaving `Null` in its place.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
