//! Statement synthesis and execution for one record type over one table.

mod bind;

mod plan;
pub(crate) use plan::Plans;
pub use plan::{DeletePlan, InsertPlan, UpdatePlan};

mod select;

use crate::{
    record::{Record, RecordDef},
    Db,
};

use rowbind_core::{
    driver::operation::{Execute, Insert, Query},
    driver::Rows,
    schema::TableCatalog,
    stmt::{DataValue, Type, Value},
    Connection, Error, Result,
};
use rowbind_sql::{stmt as sql, Serializer};

use std::{fmt, marker::PhantomData, sync::Arc};
use tracing::debug;

/// Reads and writes records of type `R` in one table.
pub struct Table<R> {
    db: Db,

    /// Logical table name, as given by the caller
    name: String,

    /// Whether the table holds only some of the record's fields
    partial: bool,

    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Table<R> {
    pub(crate) fn new(db: Db, name: &str) -> Table<R> {
        Table {
            db,
            name: name.to_string(),
            partial: false,
            _record: PhantomData,
        }
    }

    /// A table that stores only the fields of `R` it has columns for, as one
    /// part of a [`JoinedTable`](crate::JoinedTable).
    pub(crate) fn part(db: Db, name: &str) -> Table<R> {
        Table {
            partial: true,
            ..Table::new(db, name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The logical name qualified with the configured schema.
    pub fn qualified_name(&self) -> String {
        self.db.qualify(&self.name)
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn describe(&self) -> Result<Arc<RecordDef<R>>> {
        self.db.describe::<R>()
    }

    /// Resolves the table's physical catalog.
    pub async fn catalog(&self, conn: &mut dyn Connection) -> Result<Arc<TableCatalog>> {
        self.db
            .catalog()
            .resolve(conn, self.db.schema_name(), &self.name)
            .await
    }

    /// Inserts `record`, writing database-generated values back into it.
    ///
    /// Returns `true` if a row was inserted.
    pub async fn insert(&self, conn: &mut dyn Connection, record: &mut R) -> Result<bool> {
        let plan = self.build_insert(conn, record).await?;
        let catalog = self.catalog(conn).await?;
        let params = self.bind_values(&catalog, record, &plan.keys)?;

        debug!(table = %catalog.qualified_name(), sql = %plan.sql, "insert");

        let response = conn
            .exec(
                Insert {
                    sql: plan.sql.clone(),
                    params,
                    returning: plan.returning,
                }
                .into(),
            )
            .await?;

        match response.rows {
            Rows::Count(count) => Ok(count > 0),
            Rows::Cursor(mut rows) => {
                let Some(row) = rows.next().await.transpose()? else {
                    return Ok(false);
                };

                self.write_generated(&plan, rows.columns(), row, record)?;
                Ok(true)
            }
        }
    }

    /// Updates the row identified by `record`'s primary key.
    ///
    /// Returns the number of affected rows.
    pub async fn update(&self, conn: &mut dyn Connection, record: &R) -> Result<u64> {
        let plan = self.build_update(conn).await?;
        let catalog = self.catalog(conn).await?;
        let params = self.bind_values(&catalog, record, &plan.keys)?;

        debug!(table = %catalog.qualified_name(), sql = %plan.sql, "update");
        execute(conn, plan.sql.clone(), params).await
    }

    /// Deletes the row identified by `record`'s primary key.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(&self, conn: &mut dyn Connection, record: &R) -> Result<bool> {
        let plan = self.build_delete(conn).await?;
        let catalog = self.catalog(conn).await?;
        let params = self.bind_values(&catalog, record, &plan.keys)?;

        debug!(table = %catalog.qualified_name(), sql = %plan.sql, "delete");
        Ok(execute(conn, plan.sql.clone(), params).await? > 0)
    }

    /// Updates `record` if it is in the database, inserting it otherwise or
    /// when the update matched no row.
    pub async fn save(&self, conn: &mut dyn Connection, record: &mut R) -> Result<bool> {
        if self.is_in_database(record)? && self.update(conn, record).await? > 0 {
            return Ok(true);
        }

        self.insert(conn, record).await
    }

    /// Whether `record` has a complete, non-null primary key.
    pub fn is_in_database(&self, record: &R) -> Result<bool> {
        Ok(self.describe()?.is_in_database(record))
    }

    /// Fetches the next value of `sequence`, qualified with the configured schema.
    pub async fn next_key(&self, conn: &mut dyn Connection, sequence: &str) -> Result<i64> {
        let capability = conn.capability();

        if !capability.sequences {
            return Err(Error::configuration(format!(
                "{:?} connections do not support sequences",
                capability.flavor
            )));
        }

        let stmt = sql::NextVal {
            sequence: sql::TableName::new(self.db.schema_name(), sequence),
        };
        let sql = Serializer::for_capability(capability)
            .serialize(&stmt.into(), &mut Vec::<String>::new());

        debug!(sql = %sql, "next key");

        let mut rows = conn
            .exec(Query { sql, params: vec![] }.into())
            .await?
            .rows
            .into_cursor()?;

        let row = rows.next().await.transpose()?.ok_or_else(Error::empty_result)?;
        let value = row.into_iter().next().unwrap_or_default();

        let value = self.db.coercions().coerce(value, &Type::I64)?;
        value
            .as_i64()
            .ok_or_else(|| Error::coercion(value.ty(), Type::I64))
    }

    /// Returns `SELECT * FROM <table> <clause>` using the table's physical name.
    pub async fn build_select_clause(
        &self,
        conn: &mut dyn Connection,
        clause: &str,
    ) -> Result<String> {
        let catalog = self.catalog(conn).await?;

        let stmt = sql::Select {
            from: table_name(&catalog),
            clause: clause.to_string(),
        };

        Ok(Serializer::for_capability(conn.capability())
            .serialize(&stmt.into(), &mut Vec::<String>::new()))
    }

    /// Runs `sql` and returns its rows.
    pub async fn query(
        &self,
        conn: &mut dyn Connection,
        sql: impl Into<String>,
        params: Vec<Value>,
    ) -> Result<rowbind_core::driver::ResultSet> {
        let sql = sql.into();

        debug!(sql = %sql, params = params.len(), "query");

        conn.exec(
            Query {
                sql,
                params: params.into_iter().map(DataValue::untyped).collect(),
            }
            .into(),
        )
        .await?
        .rows
        .into_cursor()
    }

    /// Selects with `clause` and returns the first row, if any.
    pub async fn find_first(
        &self,
        conn: &mut dyn Connection,
        clause: &str,
        params: Vec<Value>,
    ) -> Result<Option<R>> {
        let sql = self.build_select_clause(conn, clause).await?;
        let rows = self.query(conn, sql, params).await?;
        self.first(rows).await
    }

    /// Selects with `clause`, failing if more than one row matches.
    pub async fn find_unique(
        &self,
        conn: &mut dyn Connection,
        clause: &str,
        params: Vec<Value>,
    ) -> Result<Option<R>> {
        let sql = self.build_select_clause(conn, clause).await?;
        let rows = self.query(conn, sql, params).await?;
        self.unique(rows).await
    }

    /// Selects with `clause` and returns every row.
    pub async fn find_list(
        &self,
        conn: &mut dyn Connection,
        clause: &str,
        params: Vec<Value>,
    ) -> Result<Vec<R>> {
        let sql = self.build_select_clause(conn, clause).await?;
        let rows = self.query(conn, sql, params).await?;
        self.list(rows, None).await
    }
}

async fn execute(conn: &mut dyn Connection, sql: String, params: Vec<DataValue>) -> Result<u64> {
    let response = conn.exec(Execute { sql, params }.into()).await?;
    response.rows.into_count().await
}

fn table_name(catalog: &TableCatalog) -> sql::TableName {
    sql::TableName::new(catalog.schema.as_deref(), &catalog.real_name)
}

impl<R> Clone for Table<R> {
    fn clone(&self) -> Self {
        Table {
            db: self.db.clone(),
            name: self.name.clone(),
            partial: self.partial,
            _record: PhantomData,
        }
    }
}

impl<R> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("partial", &self.partial)
            .field("record", &std::any::type_name::<R>())
            .finish()
    }
}
