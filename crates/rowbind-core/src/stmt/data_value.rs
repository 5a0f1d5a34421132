use super::{Type, Value};
use crate::{schema::SqlType, Error, Result};

/// A coerced value paired with the storage type it is bound as.
///
/// Built while assembling the parameters of one statement execution and
/// dropped afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DataValue {
    pub value: Value,
    pub sql_type: SqlType,
}

impl DataValue {
    /// Pairs a scalar value with its column type.
    pub fn scalar(value: impl Into<Value>, sql_type: SqlType) -> DataValue {
        DataValue {
            value: value.into(),
            sql_type,
        }
    }

    /// Builds a native array parameter from a host list.
    ///
    /// `Null` produces a null of the array type. The items are expected to be
    /// coerced to the element's host type already.
    pub fn array(value: Value, element: SqlType) -> Result<DataValue> {
        let element_ty = element.host_type();

        match value {
            Value::Null => Ok(DataValue {
                value: Value::Null,
                sql_type: SqlType::array(element),
            }),
            Value::List(items) => {
                if let Some(item) = items.iter().find(|item| !item.is_a(&element_ty)) {
                    return Err(Error::coercion(item.ty(), element_ty));
                }

                Ok(DataValue {
                    value: Value::List(items),
                    sql_type: SqlType::array(element),
                })
            }
            value => Err(Error::coercion(value.ty(), Type::list(element_ty))),
        }
    }

    pub fn is_array(&self) -> bool {
        self.sql_type.is_array()
    }

    /// A parameter without column information, bound as whatever the value is.
    pub fn untyped(value: impl Into<Value>) -> DataValue {
        let value = value.into();
        let sql_type = SqlType::Other(format!("{:?}", value.ty()));
        DataValue { value, sql_type }
    }
}

impl From<Value> for DataValue {
    fn from(value: Value) -> Self {
        DataValue::untyped(value)
    }
}
