//! One record type stored across a root table and the tables joined to it.

use crate::{record::Record, table::Table, Db};

use rowbind_core::{driver::ResultSet, stmt::Value, Connection, Error, Result};
use rowbind_sql::{stmt as sql, Serializer};

use std::fmt;
use tracing::debug;

/// Maps a record onto a root table plus child tables that share its primary
/// key, as with a base table and one table per subtype.
///
/// Each table stores the fields of `R` it has columns for. Writes go root
/// first and deletes go children first, so child rows never outlive or
/// precede their root row.
pub struct JoinedTable<R> {
    root: Part<R>,
    children: Vec<Child<R>>,
}

struct Part<R> {
    table: Table<R>,
    alias: String,
}

struct Child<R> {
    part: Part<R>,

    /// Join criteria against the tables before it
    on: String,
}

impl<R: Record> JoinedTable<R> {
    pub(crate) fn new(db: Db, root: &str, alias: &str) -> JoinedTable<R> {
        JoinedTable {
            root: Part {
                table: Table::part(db, root),
                alias: alias.to_string(),
            },
            children: vec![],
        }
    }

    /// Adds a child table joined with `on`, for example `c.id = v.id`.
    pub fn join(mut self, table: &str, alias: &str, on: &str) -> JoinedTable<R> {
        self.children.push(Child {
            part: Part {
                table: Table::part(self.root.table.db().clone(), table),
                alias: alias.to_string(),
            },
            on: on.to_string(),
        });
        self
    }

    /// The root table. Its cardinality variants materialize joined rows.
    pub fn root(&self) -> &Table<R> {
        &self.root.table
    }

    /// Every table, root first.
    pub fn tables(&self) -> impl Iterator<Item = &Table<R>> + '_ {
        self.parts().map(|part| &part.table)
    }

    fn parts(&self) -> impl DoubleEndedIterator<Item = &Part<R>> + '_ {
        Some(&self.root)
            .into_iter()
            .chain(self.children.iter().map(|child| &child.part))
    }

    /// Inserts into the root table, then into each child table in join order.
    ///
    /// Values generated by the root insert, such as the key, are written back
    /// before the child rows are inserted. Returns `true` if every insert
    /// added a row.
    pub async fn insert(&self, conn: &mut dyn Connection, record: &mut R) -> Result<bool> {
        let mut inserted = true;

        for table in self.tables() {
            inserted &= table.insert(conn, record).await?;
        }

        Ok(inserted)
    }

    /// Updates every table, returning the total number of affected rows.
    pub async fn update(&self, conn: &mut dyn Connection, record: &R) -> Result<u64> {
        let mut count = 0;

        for table in self.tables() {
            count += table.update(conn, record).await?;
        }

        Ok(count)
    }

    /// Deletes from the child tables in reverse join order, then from the root.
    ///
    /// Returns `true` if every delete removed a row.
    pub async fn delete(&self, conn: &mut dyn Connection, record: &R) -> Result<bool> {
        let mut deleted = true;

        for part in self.parts().rev() {
            deleted &= part.table.delete(conn, record).await?;
        }

        Ok(deleted)
    }

    /// Updates `record` if it is in the database, inserting it otherwise or
    /// when the update matched no row.
    pub async fn save(&self, conn: &mut dyn Connection, record: &mut R) -> Result<bool> {
        if self.root.table.is_in_database(record)? && self.update(conn, record).await? > 0 {
            return Ok(true);
        }

        self.insert(conn, record).await
    }

    /// Returns `SELECT <alias>.*, .. FROM <root> AS <alias> JOIN .. <clause>`
    /// using the physical table names.
    pub async fn build_select_clause(
        &self,
        conn: &mut dyn Connection,
        clause: &str,
    ) -> Result<String> {
        let from = self.root.aliased(conn).await?;
        let mut joins = Vec::with_capacity(self.children.len());

        for child in &self.children {
            joins.push(sql::Join {
                table: child.part.aliased(conn).await?,
                on: child.on.clone(),
            });
        }

        let stmt = sql::JoinedSelect {
            from,
            joins,
            clause: clause.to_string(),
        };

        Ok(Serializer::for_capability(conn.capability())
            .serialize(&stmt.into(), &mut Vec::<String>::new()))
    }

    /// Selects with `clause` and returns the first record, if any.
    pub async fn find_first(
        &self,
        conn: &mut dyn Connection,
        clause: &str,
        params: Vec<Value>,
    ) -> Result<Option<R>> {
        let rows = self.select(conn, clause, params).await?;
        self.root.table.first(rows).await
    }

    /// Selects with `clause`, failing if more than one record matches.
    pub async fn find_unique(
        &self,
        conn: &mut dyn Connection,
        clause: &str,
        params: Vec<Value>,
    ) -> Result<Option<R>> {
        let rows = self.select(conn, clause, params).await?;
        self.root.table.unique(rows).await
    }

    /// Selects with `clause` and returns every record.
    pub async fn find_list(
        &self,
        conn: &mut dyn Connection,
        clause: &str,
        params: Vec<Value>,
    ) -> Result<Vec<R>> {
        let rows = self.select(conn, clause, params).await?;
        self.root.table.list(rows, None).await
    }

    async fn select(
        &self,
        conn: &mut dyn Connection,
        clause: &str,
        params: Vec<Value>,
    ) -> Result<ResultSet> {
        let sql = self.build_select_clause(conn, clause).await?;
        debug!(sql = %sql, "joined select");
        self.root.table.query(conn, sql, params).await
    }
}

impl<R: Record> Part<R> {
    async fn aliased(&self, conn: &mut dyn Connection) -> Result<sql::Aliased> {
        if !is_plain_identifier(&self.alias) {
            return Err(Error::configuration(format!(
                "alias `{}` of `{}` is not a plain identifier",
                self.alias,
                self.table.qualified_name()
            )));
        }

        let catalog = self.table.catalog(conn).await?;

        Ok(sql::Aliased {
            table: sql::TableName::new(catalog.schema.as_deref(), &catalog.real_name),
            alias: self.alias.clone(),
        })
    }
}

/// ASCII letters, digits and underscores, not starting with a digit.
pub(crate) fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

impl<R> fmt::Debug for JoinedTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tables = vec![(&self.root.table, &self.root.alias)];
        tables.extend(
            self.children
                .iter()
                .map(|child| (&child.part.table, &child.part.alias)),
        );

        f.debug_struct("JoinedTable").field("tables", &tables).finish()
    }
}
