mod accessor;
pub(crate) use accessor::Accessor;

mod column;
pub(crate) use column::Column;

mod error;
pub(crate) use error::ErrorSet;

mod field;
pub(crate) use field::Field;

mod record;
pub(crate) use record::Record;

mod text_enum;
pub(crate) use text_enum::TextEnum;
