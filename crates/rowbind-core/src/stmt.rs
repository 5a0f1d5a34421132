mod data_value;
pub use data_value::DataValue;

mod row_stream;
pub use row_stream::RowStream;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

mod value_conversions;

mod value_record;
pub use value_record::ValueRecord;
