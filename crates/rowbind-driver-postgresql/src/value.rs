use chrono::NaiveTime;
use postgres::{
    types::{private::BytesMut, to_sql_checked, FromSql, IsNull, Kind, ToSql, Type},
    Row,
};
use rowbind_core::{
    err,
    schema::SqlType,
    stmt::{DataValue, Value as CoreValue},
    Error, Result,
};
use rust_decimal::Decimal;
use std::str::FromStr;

type BoxError = Box<dyn std::error::Error + Sync + Send>;

#[derive(Debug, Clone)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Reads column `index` of `row` according to the column's PostgreSQL type.
    pub fn from_sql(row: &Row, index: usize) -> Result<Self> {
        let ty = row.columns()[index].type_();

        let value = match *ty {
            Type::BOOL => get(row, index, CoreValue::Bool)?,
            Type::INT2 => get(row, index, CoreValue::I16)?,
            Type::INT4 => get(row, index, CoreValue::I32)?,
            Type::INT8 => get(row, index, CoreValue::I64)?,
            Type::FLOAT4 => get(row, index, CoreValue::F32)?,
            Type::FLOAT8 => get(row, index, CoreValue::F64)?,
            // Exact decimals are surfaced as text so no digits are lost
            Type::NUMERIC => {
                get(row, index, |value: Decimal| CoreValue::String(value.to_string()))?
            }
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                get(row, index, CoreValue::String)?
            }
            Type::BYTEA => get(row, index, CoreValue::Bytes)?,
            Type::UUID => get(row, index, CoreValue::Uuid)?,
            Type::TIMESTAMPTZ => get(row, index, CoreValue::Timestamp)?,
            Type::TIMESTAMP => get(row, index, CoreValue::DateTime)?,
            Type::DATE => get(row, index, CoreValue::Date)?,
            Type::TIME => get(row, index, CoreValue::Time)?,
            Type::BOOL_ARRAY => get_list(row, index, CoreValue::Bool)?,
            Type::INT2_ARRAY => get_list(row, index, CoreValue::I16)?,
            Type::INT4_ARRAY => get_list(row, index, CoreValue::I32)?,
            Type::INT8_ARRAY => get_list(row, index, CoreValue::I64)?,
            Type::FLOAT4_ARRAY => get_list(row, index, CoreValue::F32)?,
            Type::FLOAT8_ARRAY => get_list(row, index, CoreValue::F64)?,
            Type::NUMERIC_ARRAY => {
                get_list(row, index, |value: Decimal| CoreValue::String(value.to_string()))?
            }
            Type::TEXT_ARRAY | Type::VARCHAR_ARRAY | Type::BPCHAR_ARRAY => {
                get_list(row, index, CoreValue::String)?
            }
            Type::UUID_ARRAY => get_list(row, index, CoreValue::Uuid)?,
            _ => {
                return Err(err!(
                    "unsupported PostgreSQL type `{}` in column `{}`",
                    ty,
                    row.columns()[index].name()
                ))
            }
        };

        Ok(Value(value))
    }
}

fn get<'a, T: FromSql<'a>>(
    row: &'a Row,
    index: usize,
    f: impl FnOnce(T) -> CoreValue,
) -> Result<CoreValue> {
    let value: Option<T> = row.try_get(index).map_err(Error::driver)?;
    Ok(value.map(f).unwrap_or(CoreValue::Null))
}

fn get_list<'a, T: FromSql<'a>>(
    row: &'a Row,
    index: usize,
    f: impl Fn(T) -> CoreValue,
) -> Result<CoreValue> {
    let items: Option<Vec<Option<T>>> = row.try_get(index).map_err(Error::driver)?;

    Ok(match items {
        Some(items) => CoreValue::List(
            items
                .into_iter()
                .map(|item| item.map(&f).unwrap_or(CoreValue::Null))
                .collect(),
        ),
        None => CoreValue::Null,
    })
}

/// A statement parameter bound according to the storage type it was
/// declared with.
///
/// Array parameters, null ones included, only bind to array types the server
/// inferred. Scalar parameters never carry a list. Untyped parameters bind as
/// whatever their value is.
#[derive(Debug, Clone)]
pub struct Param(DataValue);

impl From<DataValue> for Param {
    fn from(value: DataValue) -> Self {
        Self(value)
    }
}

impl ToSql for Param {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> std::result::Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        let DataValue { value, sql_type } = &self.0;

        match (sql_type, value) {
            (SqlType::Array(_), value) => {
                if !matches!(ty.kind(), Kind::Array(_)) {
                    return Err(format!(
                        "cannot bind `{sql_type:?}` as non-array PostgreSQL type `{ty}`"
                    )
                    .into());
                }

                match value {
                    CoreValue::Null | CoreValue::List(_) => encode(value, ty, out),
                    value => Err(format!(
                        "cannot bind `{:?}` as array parameter `{sql_type:?}`",
                        value.ty()
                    )
                    .into()),
                }
            }
            (SqlType::Other(_), value) => encode(value, ty, out),
            (sql_type, CoreValue::List(_)) => {
                Err(format!("cannot bind a list as scalar parameter `{sql_type:?}`").into())
            }
            (_, value) => encode(value, ty, out),
        }
    }

    fn accepts(_: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> std::result::Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        encode(&self.0, ty, out)
    }

    fn accepts(_: &Type) -> bool {
        // Conversion happens in `to_sql` against the type the server inferred
        true
    }

    to_sql_checked!();
}

/// Encodes `value` as the type the server inferred for its placeholder.
fn encode(
    value: &CoreValue,
    ty: &Type,
    out: &mut BytesMut,
) -> std::result::Result<IsNull, BoxError> {
    match value {
        CoreValue::Null => Ok(IsNull::Yes),
        CoreValue::Bool(value) => value.to_sql(ty, out),
        CoreValue::I16(value) => integer(*value as i64, ty, out),
        CoreValue::I32(value) => integer(*value as i64, ty, out),
        CoreValue::I64(value) => integer(*value, ty, out),
        CoreValue::F32(value) => match *ty {
            Type::FLOAT8 => (*value as f64).to_sql(ty, out),
            Type::NUMERIC => Decimal::try_from(*value)?.to_sql(ty, out),
            _ => value.to_sql(ty, out),
        },
        CoreValue::F64(value) => match *ty {
            Type::FLOAT4 => (*value as f32).to_sql(ty, out),
            Type::NUMERIC => Decimal::try_from(*value)?.to_sql(ty, out),
            _ => value.to_sql(ty, out),
        },
        CoreValue::String(value) => match *ty {
            Type::NUMERIC => Decimal::from_str(value.trim())?.to_sql(ty, out),
            _ => value.to_sql(ty, out),
        },
        CoreValue::Bytes(value) => value.to_sql(ty, out),
        CoreValue::Uuid(value) => match *ty {
            Type::UUID => value.to_sql(ty, out),
            _ => value.to_string().to_sql(ty, out),
        },
        CoreValue::Timestamp(value) => match *ty {
            Type::TIMESTAMP => value.naive_utc().to_sql(ty, out),
            _ => value.to_sql(ty, out),
        },
        CoreValue::DateTime(value) => match *ty {
            Type::TIMESTAMPTZ => value.and_utc().to_sql(ty, out),
            _ => value.to_sql(ty, out),
        },
        CoreValue::Date(value) => match *ty {
            Type::TIMESTAMP => value.and_time(NaiveTime::MIN).to_sql(ty, out),
            _ => value.to_sql(ty, out),
        },
        CoreValue::Time(value) => value.to_sql(ty, out),
        CoreValue::List(items) => match ty.kind() {
            Kind::Array(_) => items
                .iter()
                .cloned()
                .map(Value)
                .collect::<Vec<_>>()
                .to_sql(ty, out),
            _ => Err(format!("cannot bind a list as PostgreSQL type `{ty}`").into()),
        },
    }
}

/// Binds an integer as whichever integer width the server expects.
fn integer(value: i64, ty: &Type, out: &mut BytesMut) -> std::result::Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(value)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(value)?.to_sql(ty, out),
        Type::INT8 => value.to_sql(ty, out),
        Type::FLOAT4 => (value as f32).to_sql(ty, out),
        Type::FLOAT8 => (value as f64).to_sql(ty, out),
        Type::NUMERIC => Decimal::from(value).to_sql(ty, out),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR => value.to_string().to_sql(ty, out),
        _ => Err(format!("cannot bind an integer as PostgreSQL type `{ty}`").into()),
    }
}
