use rowbind_core::{
    stmt::{Type, Value},
    Error, Result,
};

pub(super) fn coerce(value: Value, ty: &Type) -> Result<Value> {
    let Value::Bool(v) = value else {
        return Err(Error::coercion(value.ty(), ty.clone()));
    };

    match ty {
        Type::I16 => Ok(Value::I16(v as i16)),
        Type::I32 => Ok(Value::I32(v as i32)),
        Type::I64 => Ok(Value::I64(v as i64)),
        Type::String => Ok(Value::String(v.to_string())),
        _ => Err(Error::coercion(Type::Bool, ty.clone())),
    }
}
