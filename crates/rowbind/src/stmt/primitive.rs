use rowbind_core::{
    stmt::{Type, Value},
    Error, Result,
};
use uuid::Uuid;

/// A host type that a record field can hold.
///
/// `Option<T>` shares `T`'s type; nullability is reported separately through
/// [`Primitive::NULLABLE`].
pub trait Primitive: Sized {
    const NULLABLE: bool = false;

    /// The value type the field holds.
    fn ty() -> Type;

    /// Converts a value that has already been coerced to [`Primitive::ty`].
    fn load(value: Value) -> Result<Self>;

    fn into_value(self) -> Value;
}

/// Fails loading a null into a non-nullable field.
pub(crate) fn load_non_null<T: TryFrom<Value, Error = Error>>(value: Value, ty: Type) -> Result<T> {
    if value.is_null() {
        return Err(Error::coercion_failed(Type::Any, ty, "value is null"));
    }

    value.try_into()
}

macro_rules! impl_primitive {
    ( $( $ty:ty => $name:ident, )* ) => {
        $(
            impl Primitive for $ty {
                fn ty() -> Type {
                    Type::$name
                }

                fn load(value: Value) -> Result<Self> {
                    load_non_null(value, Type::$name)
                }

                fn into_value(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    String => String,
    Vec<u8> => Bytes,
    Uuid => Uuid,
}

macro_rules! impl_list_primitive {
    ( $( $ty:ty, )* ) => {
        $(
            impl Primitive for Vec<$ty> {
                fn ty() -> Type {
                    Type::list(<$ty as Primitive>::ty())
                }

                fn load(value: Value) -> Result<Self> {
                    match value {
                        Value::List(items) => {
                            items.into_iter().map(<$ty as Primitive>::load).collect()
                        }
                        value => Err(Error::coercion(value.ty(), Self::ty())),
                    }
                }

                fn into_value(self) -> Value {
                    Value::List(self.into_iter().map(Primitive::into_value).collect())
                }
            }
        )*
    };
}

impl_list_primitive! {
    bool,
    i16,
    i32,
    i64,
    f64,
    String,
    Uuid,
}

impl<T: Primitive> Primitive for Option<T> {
    const NULLABLE: bool = true;

    fn ty() -> Type {
        T::ty()
    }

    fn load(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(T::load(value)?))
        }
    }

    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}
