use super::{table_name, Table};
use crate::record::{FieldDef, Record, RecordDef};

use rowbind_core::{
    driver::{Capability, SqlFlavor},
    schema::TableCatalog,
    Connection, Error, Result,
};
use rowbind_sql::{stmt as sql, Serializer};

use std::{
    any::TypeId,
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::debug;

/// A synthesized INSERT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertPlan {
    pub sql: String,

    /// Keys of the bound values, in placeholder order
    pub keys: Vec<String>,

    /// Keys of the columns left for the database to fill in
    pub generated: Vec<String>,

    /// Whether the statement returns the generated columns
    pub returning: bool,
}

/// A synthesized UPDATE. `keys` lists the SET keys followed by the WHERE keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    pub sql: String,
    pub keys: Vec<String>,
}

/// A synthesized DELETE. `keys` are the primary key columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePlan {
    pub sql: String,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PlanKey {
    record: TypeId,

    /// Qualified table name as requested
    table: String,

    flavor: SqlFlavor,

    partial: bool,

    /// For inserts, which defaultable fields are null
    nulls: Vec<bool>,
}

type PlanMap<P> = RwLock<HashMap<PlanKey, Arc<P>>>;

/// Cache of synthesized statements. Entries are never evicted.
#[derive(Default)]
pub(crate) struct Plans {
    inserts: PlanMap<InsertPlan>,
    updates: PlanMap<UpdatePlan>,
    deletes: PlanMap<DeletePlan>,
}

impl Plans {
    pub(crate) fn len(&self) -> usize {
        fn len<P>(map: &PlanMap<P>) -> usize {
            map.read().unwrap_or_else(PoisonError::into_inner).len()
        }

        len(&self.inserts) + len(&self.updates) + len(&self.deletes)
    }
}

fn cached<P>(map: &PlanMap<P>, key: &PlanKey) -> Option<Arc<P>> {
    map.read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(key)
        .cloned()
}

/// Stores `plan` unless an equal one was stored concurrently, returning the
/// cached entry.
fn store<P>(map: &PlanMap<P>, key: PlanKey, plan: P) -> Arc<P> {
    map.write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(key)
        .or_insert_with(|| Arc::new(plan))
        .clone()
}

impl<R: Record> Table<R> {
    /// Builds the INSERT for `record`.
    ///
    /// Defaultable fields holding null are left out of the statement and
    /// listed in [`InsertPlan::generated`]. Plans are cached per combination
    /// of null defaultable fields.
    pub async fn build_insert(
        &self,
        conn: &mut dyn Connection,
        record: &R,
    ) -> Result<Arc<InsertPlan>> {
        let def = self.describe()?;

        let nulls = def
            .fields()
            .filter(|(_, field)| field.is_defaultable())
            .map(|(_, field)| is_null_default(field, record))
            .collect::<Result<Vec<_>>>()?;

        let key = self.plan_key(conn.capability().flavor, nulls);

        if let Some(plan) = cached(&self.db.plans().inserts, &key) {
            return Ok(plan);
        }

        let catalog = self.catalog(conn).await?;
        if !self.partial {
            check_columns(&def, &catalog)?;
        }

        let plan = insert_plan(&def, &catalog, record, conn.capability())?;

        debug!(
            table = %catalog.qualified_name(),
            sql = %plan.sql,
            generated = ?plan.generated,
            "built insert plan"
        );

        Ok(store(&self.db.plans().inserts, key, plan))
    }

    /// Builds the UPDATE: non-key columns in SET, key columns in WHERE.
    pub async fn build_update(&self, conn: &mut dyn Connection) -> Result<Arc<UpdatePlan>> {
        let def = self.describe()?;

        if !def.has_primary_key() {
            return Err(Error::no_primary_key(def.name()).context(format!(
                "cannot update `{}`",
                self.qualified_name()
            )));
        }

        let key = self.plan_key(conn.capability().flavor, vec![]);

        if let Some(plan) = cached(&self.db.plans().updates, &key) {
            return Ok(plan);
        }

        let catalog = self.catalog(conn).await?;

        if !self.partial {
            check_columns(&def, &catalog)?;
        }

        let assignments: Vec<String> = catalog
            .columns()
            .filter(|(key, _)| {
                def.field(key)
                    .is_some_and(|field| field.is_readable() && !field.is_primary_key())
            })
            .map(|(_, column)| column.real_name.clone())
            .collect();

        if assignments.is_empty() {
            return Err(Error::configuration(format!(
                "record type `{}` has no columns to update in `{}`",
                def.name(),
                catalog.qualified_name()
            )));
        }

        let stmt = sql::Update {
            table: table_name(&catalog),
            assignments,
            filter: primary_key_columns(&def, &catalog)?,
        };

        let mut params = Vec::<String>::new();
        let sql =
            Serializer::for_capability(conn.capability()).serialize(&stmt.into(), &mut params);
        let plan = UpdatePlan {
            sql,
            keys: lowercase(params),
        };

        debug!(table = %catalog.qualified_name(), sql = %plan.sql, "built update plan");

        Ok(store(&self.db.plans().updates, key, plan))
    }

    /// Builds the DELETE, filtered by the primary key columns.
    pub async fn build_delete(&self, conn: &mut dyn Connection) -> Result<Arc<DeletePlan>> {
        let def = self.describe()?;

        if !def.has_primary_key() {
            return Err(Error::no_primary_key(def.name()).context(format!(
                "cannot delete from `{}`",
                self.qualified_name()
            )));
        }

        let key = self.plan_key(conn.capability().flavor, vec![]);

        if let Some(plan) = cached(&self.db.plans().deletes, &key) {
            return Ok(plan);
        }

        let catalog = self.catalog(conn).await?;

        let stmt = sql::Delete {
            from: table_name(&catalog),
            filter: primary_key_columns(&def, &catalog)?,
        };

        let mut params = Vec::<String>::new();
        let sql =
            Serializer::for_capability(conn.capability()).serialize(&stmt.into(), &mut params);
        let plan = DeletePlan {
            sql,
            keys: lowercase(params),
        };

        debug!(table = %catalog.qualified_name(), sql = %plan.sql, "built delete plan");

        Ok(store(&self.db.plans().deletes, key, plan))
    }

    fn plan_key(&self, flavor: SqlFlavor, nulls: Vec<bool>) -> PlanKey {
        PlanKey {
            record: TypeId::of::<R>(),
            table: self.qualified_name(),
            flavor,
            partial: self.partial,
            nulls,
        }
    }
}

fn insert_plan<R>(
    def: &RecordDef<R>,
    catalog: &TableCatalog,
    record: &R,
    capability: &Capability,
) -> Result<InsertPlan> {
    let mut columns = vec![];
    let mut generated = vec![];

    for (key, column) in catalog.columns() {
        let Some(field) = def.field(key) else {
            continue;
        };

        if field.is_defaultable() && is_null_default(field, record)? {
            if field.is_writable() {
                generated.push(column.real_name.clone());
            }
        } else if field.is_readable() {
            columns.push(column.real_name.clone());
        }
    }

    let returning = capability.returning && !generated.is_empty();

    let stmt = sql::Insert {
        table: table_name(catalog),
        columns,
        returning: if returning { generated.clone() } else { vec![] },
    };

    let mut params = Vec::<String>::new();
    let sql = Serializer::for_capability(capability).serialize(&stmt.into(), &mut params);

    Ok(InsertPlan {
        sql,
        keys: lowercase(params),
        generated: lowercase(generated),
        returning,
    })
}

/// A write-only defaultable field is always left to the database.
fn is_null_default<R>(field: &FieldDef<R>, record: &R) -> Result<bool> {
    if !field.is_readable() {
        return Ok(true);
    }

    Ok(field.get(record)?.is_null())
}

/// Every readable field must have a column to bind to.
fn check_columns<R>(def: &RecordDef<R>, catalog: &TableCatalog) -> Result<()> {
    for (key, field) in def.fields() {
        if field.is_readable() && catalog.column(key).is_none() {
            return Err(Error::missing_column(
                key,
                format!("table `{}`", catalog.qualified_name()),
            ));
        }
    }

    Ok(())
}

fn primary_key_columns<R>(def: &RecordDef<R>, catalog: &TableCatalog) -> Result<Vec<String>> {
    def.primary_key_keys()
        .map(|key| match catalog.column(key) {
            Some(column) => Ok(column.real_name.clone()),
            None => Err(Error::missing_column(
                key,
                format!("table `{}`", catalog.qualified_name()),
            )),
        })
        .collect()
}

fn lowercase(names: Vec<String>) -> Vec<String> {
    names.into_iter().map(|name| name.to_lowercase()).collect()
}

impl fmt::Debug for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plans").field("len", &self.len()).finish()
    }
}
