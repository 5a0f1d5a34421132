use rowbind_core::{
    stmt::{Type, Value},
    Error, Result,
};

pub(super) fn coerce(value: Value, ty: &Type) -> Result<Value> {
    let v = match value {
        Value::F32(v) => v as f64,
        Value::F64(v) => v,
        value => return Err(Error::coercion(value.ty(), ty.clone())),
    };

    match ty {
        Type::F32 => Ok(Value::F32(v as f32)),
        Type::F64 => Ok(Value::F64(v)),
        Type::String => Ok(Value::String(v.to_string())),
        _ => Err(Error::coercion(Type::F64, ty.clone())),
    }
}
