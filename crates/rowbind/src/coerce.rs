//! Conversion of values between host types.
//!
//! A [`Coercions`] registry maps a value's runtime type to the coercer that
//! converts it. Values are coerced to a column's host type before they are
//! bound and to a field's type before they are written to a record.

mod boolean;
mod float;
mod integer;
mod string;
mod temporal;
mod uuid_value;

use rowbind_core::{
    stmt::{Type, Value},
    Result,
};

use std::{collections::HashMap, fmt, sync::Arc};

/// Converts a value to a destination type.
pub trait Coerce: Send + Sync + 'static {
    fn coerce(&self, value: Value, ty: &Type) -> Result<Value>;
}

impl<F> Coerce for F
where
    F: Fn(Value, &Type) -> Result<Value> + Send + Sync + 'static,
{
    fn coerce(&self, value: Value, ty: &Type) -> Result<Value> {
        self(value, ty)
    }
}

/// Registry of coercers keyed by the source value's type.
#[derive(Clone)]
pub struct Coercions {
    coercers: HashMap<Type, Arc<dyn Coerce>>,
}

/// Returns values unchanged. Used when no coercer is registered for a type.
struct Identity;

impl Coerce for Identity {
    fn coerce(&self, value: Value, _ty: &Type) -> Result<Value> {
        Ok(value)
    }
}

impl Coercions {
    /// A registry with no coercers; every value passes through unchanged.
    pub fn empty() -> Coercions {
        Coercions {
            coercers: HashMap::new(),
        }
    }

    /// Registers `coercer` for values of type `ty`, replacing any previous one.
    ///
    /// List types are registered by their erased form, so a coercer
    /// registered for `Type::list(Type::String)` handles every list.
    pub fn register(&mut self, ty: Type, coercer: impl Coerce) -> &mut Self {
        self.coercers.insert(ty.erased(), Arc::new(coercer));
        self
    }

    pub fn is_registered(&self, ty: &Type) -> bool {
        self.coercers.contains_key(&ty.erased())
    }

    /// Coerces `value` to `ty`.
    ///
    /// Null, values already of type `ty`, and a destination of [`Type::Any`]
    /// are returned as-is without consulting a coercer.
    pub fn coerce(&self, value: Value, ty: &Type) -> Result<Value> {
        if value.is_null() || ty.is_any() || value.is_a(ty) {
            return Ok(value);
        }

        let from = value.ty().erased();

        if let Some(coercer) = self.coercers.get(&from) {
            return coercer.coerce(value, ty);
        }

        match (value, ty) {
            (Value::List(items), Type::List(element)) => items
                .into_iter()
                .map(|item| self.coerce(item, element))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            (value, ty) => Identity.coerce(value, ty),
        }
    }
}

impl Default for Coercions {
    /// A registry with the built-in coercers.
    fn default() -> Coercions {
        let mut coercions = Coercions::empty();

        coercions
            .register(Type::String, string::coerce)
            .register(Type::I16, integer::coerce)
            .register(Type::I32, integer::coerce)
            .register(Type::I64, integer::coerce)
            .register(Type::F32, float::coerce)
            .register(Type::F64, float::coerce)
            .register(Type::Bool, boolean::coerce)
            .register(Type::Uuid, uuid_value::coerce)
            .register(Type::Timestamp, temporal::from_timestamp)
            .register(Type::DateTime, temporal::from_datetime)
            .register(Type::Date, temporal::from_date)
            .register(Type::Time, temporal::from_time);

        coercions
    }
}

impl fmt::Debug for Coercions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coercions")
            .field("registered", &self.coercers.keys().collect::<Vec<_>>())
            .finish()
    }
}
