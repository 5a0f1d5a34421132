use rowbind_core::{
    stmt::{Type, Value},
    Error, Result,
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::{fmt::Display, str::FromStr};
use uuid::Uuid;

pub(super) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
pub(super) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(super) const TIME_FORMAT: &str = "%H:%M:%S%.f";

pub(super) fn coerce(value: Value, ty: &Type) -> Result<Value> {
    let Value::String(s) = value else {
        return Err(Error::coercion(value.ty(), ty.clone()));
    };

    Ok(match ty {
        Type::Bool => Value::Bool(parse_bool(&s, ty)?),
        Type::I16 => Value::I16(parse_integer(&s, ty)?),
        Type::I32 => Value::I32(parse_integer(&s, ty)?),
        Type::I64 => Value::I64(parse_integer(&s, ty)?),
        Type::F32 => Value::F32(parse(&s, ty)?),
        Type::F64 => Value::F64(parse(&s, ty)?),
        Type::Bytes => Value::Bytes(s.into_bytes()),
        Type::Uuid => Value::Uuid(Uuid::parse_str(s.trim()).map_err(|e| failed(ty, e))?),
        Type::Timestamp => Value::Timestamp(parse_timestamp(&s, ty)?),
        Type::DateTime => Value::DateTime(parse_datetime(&s, ty)?),
        Type::Date => Value::Date(
            NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| failed(ty, e))?,
        ),
        Type::Time => Value::Time(
            NaiveTime::parse_from_str(s.trim(), TIME_FORMAT).map_err(|e| failed(ty, e))?,
        ),
        _ => return Err(Error::coercion(Type::String, ty.clone())),
    })
}

fn failed(ty: &Type, reason: impl Display) -> Error {
    Error::coercion_failed(Type::String, ty.clone(), reason)
}

fn parse<T>(s: &str, ty: &Type) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    s.trim().parse().map_err(|e| failed(ty, e))
}

/// Also accepts decimal text with a zero fraction, such as `42.00` read
/// from a NUMERIC column.
fn parse_integer<T>(s: &str, ty: &Type) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let s = s.trim();

    match s.split_once('.') {
        Some((whole, fraction)) if !whole.is_empty() && fraction.bytes().all(|b| b == b'0') => {
            parse(whole, ty)
        }
        _ => parse(s, ty),
    }
}

fn parse_bool(s: &str, ty: &Type) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Ok(true),
        "false" | "f" | "no" | "n" | "0" => Ok(false),
        other => Err(failed(ty, format!("`{other}` is not a boolean"))),
    }
}

/// Accepts RFC 3339, or a zone-less date and time taken as UTC.
fn parse_timestamp(s: &str, ty: &Type) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let naive = parse_datetime(s, ty)?;
    Ok(Utc.from_utc_datetime(&naive))
}

fn parse_datetime(s: &str, ty: &Type) -> Result<NaiveDateTime> {
    let s = s.trim();

    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|e| failed(ty, e))
}
