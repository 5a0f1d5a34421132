mod value;
pub(crate) use value::Value;

use rowbind_core::{
    async_trait,
    driver::{Capability, Operation, Response, ResultSet},
    schema::{ColumnInfo, SqlType},
    stmt::{DataValue, ValueRecord},
    Error, Result,
};
use rusqlite::Connection as RusqliteConnection;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a connection URL such as
    /// `sqlite::memory:` or `sqlite:/var/data/app.db`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(Error::configuration(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> String {
        match self {
            Sqlite::InMemory => "sqlite::memory:".to_string(),
            Sqlite::File(path) => format!("sqlite:{}", path.display()),
        }
    }

    /// Opens a connection. Every in-memory connection is a fresh database.
    pub async fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self { connection })
    }

    /// Runs one or more semicolon separated statements without parameters.
    ///
    /// Useful for creating tables; rowbind itself never issues DDL.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.connection.execute_batch(sql).map_err(Error::driver)
    }

    fn execute(&self, sql: &str, params: &[DataValue]) -> Result<u64> {
        let params = bind(params)?;
        let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;
        let count = stmt
            .execute(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        Ok(count as u64)
    }

    fn query(&self, sql: &str, params: &[DataValue]) -> Result<ResultSet> {
        let params = bind(params)?;
        let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let declared: Vec<Option<SqlType>> = stmt
            .columns()
            .iter()
            .map(|column| column.decl_type().map(value::column_type))
            .collect();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Error::driver)? {
            let mut fields = Vec::with_capacity(columns.len());

            for (index, declared) in declared.iter().enumerate() {
                fields.push(Value::from_sql(row, index, declared.as_ref())?.into_inner());
            }

            ret.push(ValueRecord::from_vec(fields));
        }

        Ok(ResultSet::from_rows(columns, ret))
    }
}

/// Converts parameters to driver values. SQLite has no array columns, so a
/// parameter declared as an array is rejected even when its value is null.
fn bind(params: &[DataValue]) -> Result<Vec<Value>> {
    params
        .iter()
        .map(|param| {
            if param.is_array() {
                return Err(Error::driver(rusqlite::Error::ToSqlConversionFailure(
                    format!("SQLite has no array type; cannot bind `{:?}`", param.sql_type).into(),
                )));
            }

            Ok(Value::from(param.value.clone()))
        })
        .collect()
}

#[async_trait]
impl rowbind_core::driver::Connection for Connection {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        tracing::trace!(sql = %op.sql(), params = op.params().len(), "sqlite exec");

        match op {
            Operation::Execute(op) => Ok(Response::count(self.execute(&op.sql, &op.params)?)),
            Operation::Insert(op) if op.returning => {
                Ok(Response::cursor(self.query(&op.sql, &op.params)?))
            }
            Operation::Insert(op) => Ok(Response::count(self.execute(&op.sql, &op.params)?)),
            Operation::Query(op) => Ok(Response::cursor(self.query(&op.sql, &op.params)?)),
        }
    }

    async fn list_tables(&mut self, schema: Option<&str>) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT name FROM {}sqlite_master WHERE type IN ('table', 'view') ORDER BY name",
            schema_prefix(schema)
        );

        let mut stmt = self.connection.prepare_cached(&sql).map_err(Error::driver)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(Error::driver)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::driver)
    }

    async fn list_columns(
        &mut self,
        schema: Option<&str>,
        table: &str,
    ) -> Result<Vec<ColumnInfo>> {
        let schema = schema.unwrap_or("main");
        let mut stmt = self
            .connection
            .prepare_cached("SELECT name, type FROM pragma_table_info(?1, ?2) ORDER BY cid")
            .map_err(Error::driver)?;

        let rows = stmt
            .query_map([table, schema], |row| {
                let name: String = row.get(0)?;
                let declared: String = row.get(1)?;
                Ok(ColumnInfo::new(name, value::column_type(&declared)))
            })
            .map_err(Error::driver)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::driver)
    }
}

fn schema_prefix(schema: Option<&str>) -> String {
    match schema {
        Some(schema) => format!("\"{}\".", schema.replace('"', "\"\"")),
        None => String::new(),
    }
}
