mod primitive;
pub use primitive::Primitive;

mod primitive_chrono;

pub use rowbind_core::stmt::{DataValue, RowStream, Type, Value, ValueRecord};
