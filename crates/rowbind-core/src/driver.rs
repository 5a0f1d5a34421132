mod capability;
pub use capability::{Capability, SqlFlavor};

mod response;
pub use response::{Response, ResultSet, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, schema::ColumnInfo, Result};

use std::fmt::Debug;

/// A live database connection, owned by the caller.
///
/// rowbind never opens, pools or closes connections. Every mapping operation
/// borrows one for its duration.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Describes what the database supports.
    fn capability(&self) -> &'static Capability;

    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;

    /// Lists the table names visible in `schema`, or in the default schema when `None`.
    async fn list_tables(&mut self, schema: Option<&str>) -> Result<Vec<String>>;

    /// Lists the columns of `table` in ordinal order. `table` is the physical name.
    async fn list_columns(&mut self, schema: Option<&str>, table: &str)
        -> Result<Vec<ColumnInfo>>;
}
