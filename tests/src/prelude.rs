//! Common imports for test files
//!
//! `use tests::prelude::*;`

pub use crate::{init_tracing, ExecLog, LoggingConnection, MockConnection};

pub use rowbind::{
    driver::{Capability, Connection, Operation},
    schema::{ColumnInfo, SqlType},
    stmt::Value,
    ColumnPolicy, Db, Error, Record, Result,
};

pub use std_util::prelude::*;
