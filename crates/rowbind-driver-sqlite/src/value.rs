use rowbind_core::{schema::SqlType, stmt::Value as CoreValue, Error, Result};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};

/// Text layout used for date and time values, which SQLite stores as TEXT.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Reads the value at `index`, using the column's declared type when the
    /// storage class alone is ambiguous.
    pub fn from_sql(row: &Row<'_>, index: usize, declared: Option<&SqlType>) -> Result<Self> {
        let value = row.get_ref(index).map_err(Error::driver)?;

        let core_value = match value {
            ValueRef::Null => CoreValue::Null,
            ValueRef::Integer(value) => match declared {
                Some(SqlType::Boolean) => CoreValue::Bool(value != 0),
                _ => CoreValue::I64(value),
            },
            ValueRef::Real(value) => CoreValue::F64(value),
            ValueRef::Text(bytes) => {
                let text = std::str::from_utf8(bytes).map_err(Error::driver)?;
                CoreValue::String(text.to_string())
            }
            ValueRef::Blob(bytes) => CoreValue::Bytes(bytes.to_vec()),
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let owned = |value: SqlValue| Ok(ToSqlOutput::Owned(value));

        match &self.0 {
            CoreValue::Null => owned(SqlValue::Null),
            CoreValue::Bool(value) => owned(SqlValue::Integer(*value as i64)),
            CoreValue::I16(value) => owned(SqlValue::Integer(*value as i64)),
            CoreValue::I32(value) => owned(SqlValue::Integer(*value as i64)),
            CoreValue::I64(value) => owned(SqlValue::Integer(*value)),
            CoreValue::F32(value) => owned(SqlValue::Real(*value as f64)),
            CoreValue::F64(value) => owned(SqlValue::Real(*value)),
            CoreValue::String(value) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes()))),
            CoreValue::Bytes(value) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&value[..]))),
            CoreValue::Uuid(value) => owned(SqlValue::Text(value.to_string())),
            CoreValue::Timestamp(value) => owned(SqlValue::Text(
                value.naive_utc().format(DATETIME_FORMAT).to_string(),
            )),
            CoreValue::DateTime(value) => {
                owned(SqlValue::Text(value.format(DATETIME_FORMAT).to_string()))
            }
            CoreValue::Date(value) => owned(SqlValue::Text(value.format(DATE_FORMAT).to_string())),
            CoreValue::Time(value) => owned(SqlValue::Text(value.format(TIME_FORMAT).to_string())),
            CoreValue::List(_) => Err(rusqlite::Error::ToSqlConversionFailure(
                "SQLite has no array type; list values cannot be bound".into(),
            )),
        }
    }
}

/// Maps a declared column type to a storage type, following SQLite's
/// affinity rules for names that are not standard SQL.
pub(crate) fn column_type(declared: &str) -> SqlType {
    match SqlType::parse(declared) {
        // INTEGER columns hold 64-bit values in SQLite, and REAL is 8 bytes
        SqlType::SmallInt | SqlType::Integer => SqlType::BigInt,
        SqlType::Real => SqlType::Double,
        SqlType::Other(name) => {
            let name = name.to_lowercase();

            if name.contains("int") {
                SqlType::BigInt
            } else if name.contains("char") || name.contains("clob") || name.contains("text") {
                SqlType::Text
            } else if name.is_empty() || name.contains("blob") {
                SqlType::Other(name)
            } else if name.contains("real") || name.contains("floa") || name.contains("doub") {
                SqlType::Double
            } else {
                // `JSON`, `MONEY` and the like bind whatever value they are given
                SqlType::Other(name)
            }
        }
        ty => ty,
    }
}
