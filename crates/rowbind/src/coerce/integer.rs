use rowbind_core::{
    stmt::{Type, Value},
    Error, Result,
};

pub(super) fn coerce(value: Value, ty: &Type) -> Result<Value> {
    let from = value.ty();
    let Some(v) = value.as_i64() else {
        return Err(Error::coercion(from, ty.clone()));
    };

    let out_of_range =
        || Error::coercion_failed(from.clone(), ty.clone(), format!("{v} is out of range"));

    Ok(match ty {
        Type::I16 => Value::I16(i16::try_from(v).map_err(|_| out_of_range())?),
        Type::I32 => Value::I32(i32::try_from(v).map_err(|_| out_of_range())?),
        Type::I64 => Value::I64(v),
        Type::F32 => Value::F32(v as f32),
        Type::F64 => Value::F64(v as f64),
        Type::Bool => Value::Bool(v != 0),
        Type::String => Value::String(v.to_string()),
        _ => return Err(Error::coercion(from.clone(), ty.clone())),
    })
}
