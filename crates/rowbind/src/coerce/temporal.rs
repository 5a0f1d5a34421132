use super::string::{DATETIME_FORMAT, DATE_FORMAT, TIME_FORMAT};

use chrono::{NaiveTime, TimeZone, Utc};
use rowbind_core::{
    stmt::{Type, Value},
    Error, Result,
};

pub(super) fn from_timestamp(value: Value, ty: &Type) -> Result<Value> {
    let Value::Timestamp(v) = value else {
        return Err(Error::coercion(value.ty(), ty.clone()));
    };

    match ty {
        Type::DateTime => Ok(Value::DateTime(v.naive_utc())),
        Type::Date => Ok(Value::Date(v.date_naive())),
        Type::String => Ok(Value::String(v.format(DATETIME_FORMAT).to_string())),
        _ => Err(Error::coercion(Type::Timestamp, ty.clone())),
    }
}

/// Zone-less date-times are taken as UTC.
pub(super) fn from_datetime(value: Value, ty: &Type) -> Result<Value> {
    let Value::DateTime(v) = value else {
        return Err(Error::coercion(value.ty(), ty.clone()));
    };

    match ty {
        Type::Timestamp => Ok(Value::Timestamp(Utc.from_utc_datetime(&v))),
        Type::Date => Ok(Value::Date(v.date())),
        Type::String => Ok(Value::String(v.format(DATETIME_FORMAT).to_string())),
        _ => Err(Error::coercion(Type::DateTime, ty.clone())),
    }
}

pub(super) fn from_date(value: Value, ty: &Type) -> Result<Value> {
    let Value::Date(v) = value else {
        return Err(Error::coercion(value.ty(), ty.clone()));
    };

    let midnight = v.and_time(NaiveTime::MIN);

    match ty {
        Type::DateTime => Ok(Value::DateTime(midnight)),
        Type::Timestamp => Ok(Value::Timestamp(Utc.from_utc_datetime(&midnight))),
        Type::String => Ok(Value::String(v.format(DATE_FORMAT).to_string())),
        _ => Err(Error::coercion(Type::Date, ty.clone())),
    }
}

pub(super) fn from_time(value: Value, ty: &Type) -> Result<Value> {
    match (value, ty) {
        (Value::Time(v), Type::String) => Ok(Value::String(v.format(TIME_FORMAT).to_string())),
        (value, ty) => Err(Error::coercion(value.ty(), ty.clone())),
    }
}
