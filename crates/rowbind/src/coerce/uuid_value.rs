use rowbind_core::{
    stmt::{Type, Value},
    Error, Result,
};

pub(super) fn coerce(value: Value, ty: &Type) -> Result<Value> {
    match (value, ty) {
        (Value::Uuid(v), Type::String) => Ok(Value::String(v.to_string())),
        (Value::Uuid(v), Type::Bytes) => Ok(Value::Bytes(v.as_bytes().to_vec())),
        (value, ty) => Err(Error::coercion(value.ty(), ty.clone())),
    }
}
