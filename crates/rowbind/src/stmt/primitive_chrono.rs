use super::primitive::load_non_null;
use crate::stmt::Primitive;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rowbind_core::{
    stmt::{Type, Value},
    Result,
};

macro_rules! impl_chrono_primitive {
    ($ty:ty, $name:ident) => {
        impl Primitive for $ty {
            fn ty() -> Type {
                Type::$name
            }

            fn load(value: Value) -> Result<Self> {
                load_non_null(value, Type::$name)
            }

            fn into_value(self) -> Value {
                Value::$name(self)
            }
        }
    };
}

impl_chrono_primitive!(DateTime<Utc>, Timestamp);
impl_chrono_primitive!(NaiveDateTime, DateTime);
impl_chrono_primitive!(NaiveDate, Date);
impl_chrono_primitive!(NaiveTime, Time);
