mod builder;
pub use builder::Builder;

use crate::{
    catalog::Catalog,
    coerce::Coercions,
    joined::JoinedTable,
    materialize::ColumnPolicy,
    record::{Record, RecordDef, Records},
    table::{Plans, Table},
    Result,
};

use rowbind_core::schema;

use std::{fmt, sync::Arc};

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    pub(crate) schema: Option<String>,
    pub(crate) policy: ColumnPolicy,
    pub(crate) coercions: Coercions,
    pub(crate) records: Records,
    pub(crate) catalog: Catalog,
    pub(crate) plans: Plans,
}

/// A handle to the mapping configuration and metadata caches.
///
/// `Db` owns no connection. Every operation takes the caller's connection.
/// Cloning is cheap and clones share their caches.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// A `Db` with the default configuration.
    pub fn new() -> Db {
        Db::from_shared(Shared {
            schema: None,
            policy: ColumnPolicy::default(),
            coercions: Coercions::default(),
            records: Records::new(),
            catalog: Catalog::new(false),
            plans: Plans::default(),
        })
    }

    fn from_shared(shared: Shared) -> Db {
        Db {
            shared: Arc::new(shared),
        }
    }

    /// The schema tables and sequences are qualified with.
    pub fn schema_name(&self) -> Option<&str> {
        self.shared.schema.as_deref()
    }

    /// Returns `schema.name`, or `name` when no schema is configured.
    pub fn qualify(&self, name: &str) -> String {
        schema::qualify(self.schema_name(), name)
    }

    /// Maps records of type `R` onto table `name`.
    pub fn table<R: Record>(&self, name: &str) -> Table<R> {
        Table::new(self.clone(), name)
    }

    /// Maps records of type `R` onto root table `root`, referenced as `alias`
    /// in selects. Child tables are added with [`JoinedTable::join`].
    pub fn joined<R: Record>(&self, root: &str, alias: &str) -> JoinedTable<R> {
        JoinedTable::new(self.clone(), root, alias)
    }

    /// Returns the field metadata of `R`, deriving it on first access.
    pub fn describe<R: Record>(&self) -> Result<Arc<RecordDef<R>>> {
        self.shared.records.describe::<R>()
    }

    pub fn column_policy(&self) -> ColumnPolicy {
        self.shared.policy
    }

    pub fn coercions(&self) -> &Coercions {
        &self.shared.coercions
    }

    pub fn catalog(&self) -> &Catalog {
        &self.shared.catalog
    }

    pub fn records(&self) -> &Records {
        &self.shared.records
    }

    pub(crate) fn plans(&self) -> &Plans {
        &self.shared.plans
    }
}

impl Default for Db {
    fn default() -> Db {
        Db::new()
    }
}

impl fmt::Debug for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("schema", &self.shared.schema)
            .field("policy", &self.shared.policy)
            .field("catalog", &self.shared.catalog)
            .field("records", &self.shared.records)
            .finish()
    }
}
