//! Resolution of logical table names to their physical catalog.

use rowbind_core::{
    err,
    schema::{self, TableCatalog},
    Connection, Error, Result,
};

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Cache key: schema and table names as requested.
///
/// Spellings are not folded, so `monster` and `MONSTER` resolve separately and
/// each finds its own exact match when the database has both.
type CatalogKey = (Option<String>, String);

/// Resolves and caches table catalogs for the lifetime of a [`Db`](crate::Db).
pub struct Catalog {
    allow_missing_tables: bool,
    tables: Mutex<HashMap<CatalogKey, Arc<OnceCell<Arc<TableCatalog>>>>>,
}

impl Catalog {
    pub fn new(allow_missing_tables: bool) -> Catalog {
        Catalog {
            allow_missing_tables,
            tables: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the catalog of `table`, querying the database on first access.
    ///
    /// Concurrent first accesses to the same table share one resolution.
    /// Failures are not cached.
    pub async fn resolve(
        &self,
        conn: &mut dyn Connection,
        schema: Option<&str>,
        table: &str,
    ) -> Result<Arc<TableCatalog>> {
        let cell = self
            .tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key(schema, table))
            .or_default()
            .clone();

        let resolved = cell
            .get_or_try_init(move || load(conn, schema, table))
            .await
            .cloned();

        match resolved {
            Err(err) if self.allow_missing_tables && err.is_table_not_found() => {
                warn!(
                    table = %schema::qualify(schema, table),
                    "table does not exist; using an empty catalog"
                );
                Ok(Arc::new(TableCatalog::empty(
                    schema.map(str::to_string),
                    table,
                )))
            }
            resolved => resolved,
        }
    }

    /// Returns the catalog of `table` if it has already been resolved.
    pub fn cached(&self, schema: Option<&str>, table: &str) -> Option<Arc<TableCatalog>> {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key(schema, table))
            .and_then(|cell| cell.get().cloned())
    }

    pub fn allows_missing_tables(&self) -> bool {
        self.allow_missing_tables
    }
}

fn key(schema: Option<&str>, table: &str) -> CatalogKey {
    (schema.map(str::to_string), table.to_string())
}

async fn load(
    conn: &mut dyn Connection,
    schema: Option<&str>,
    table: &str,
) -> Result<Arc<TableCatalog>> {
    let tables = conn.list_tables(schema).await.map_err(|e| {
        e.context(err!(
            "failed to list tables in schema `{}`",
            schema.unwrap_or("<default>")
        ))
    })?;

    // An exact match wins over a case-insensitive one
    let real_name = tables
        .iter()
        .find(|name| *name == table)
        .or_else(|| tables.iter().find(|name| name.eq_ignore_ascii_case(table)))
        .cloned()
        .ok_or_else(|| Error::table_not_found(schema, table))?;

    let columns = conn.list_columns(schema, &real_name).await.map_err(|e| {
        e.context(err!(
            "failed to read columns of `{}`",
            schema::qualify(schema, &real_name)
        ))
    })?;

    let catalog = TableCatalog::new(schema.map(str::to_string), real_name, columns);

    debug!(
        table = %catalog.qualified_name(),
        columns = catalog.len(),
        "resolved table catalog"
    );

    Ok(Arc::new(catalog))
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Catalog")
            .field("allow_missing_tables", &self.allow_missing_tables)
            .field("tables", &tables.len())
            .finish()
    }
}
