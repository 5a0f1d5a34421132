extern crate self as rowbind;

pub mod catalog;
pub use catalog::Catalog;

pub mod coerce;
pub use coerce::{Coerce, Coercions};

pub mod db;
pub use db::Db;

pub mod joined;
pub use joined::JoinedTable;

pub mod materialize;
pub use materialize::{ColumnPolicy, Materializer};

pub mod record;
pub use record::{Bindings, FieldDef, PrimaryKey, Record, RecordDef, Records};

pub mod stmt;
pub use stmt::Primitive;

pub mod table;
pub use table::Table;

pub use rowbind_core::{bail, driver, err, schema, Connection, Error, Result};

pub use rowbind_macros::{Primitive, Record};

#[cfg(feature = "postgresql")]
pub use rowbind_driver_postgresql as postgresql;

#[cfg(feature = "sqlite")]
pub use rowbind_driver_sqlite as sqlite;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        record::{Bindings, Record},
        stmt::{Primitive, Type, Value},
        Error, Result,
    };
}
