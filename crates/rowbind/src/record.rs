//! Per-record-type field metadata.

mod bindings;
pub use bindings::{Bindings, FieldBuilder};

mod field_def;
pub use field_def::FieldDef;

mod primary_key;
pub use primary_key::PrimaryKey;

mod record_def;
pub use record_def::RecordDef;

use rowbind_core::{err, Result};

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::debug;

/// A struct whose fields map to the columns of a table.
///
/// Usually implemented with `#[derive(Record)]`. A manual implementation
/// registers its bindings in [`Record::bind`]:
///
/// ```
/// use rowbind::{Bindings, Record};
///
/// #[derive(Debug, Default)]
/// struct Note {
///     id: Option<i64>,
///     body: String,
/// }
///
/// impl Record for Note {
///     fn bind(bindings: &mut Bindings<Self>) {
///         bindings
///             .field("id", "id", |n| &n.id, |n| &mut n.id)
///             .primary_key()
///             .defaultable();
///         bindings.field("body", "body", |n| &n.body, |n| &mut n.body);
///     }
/// }
/// ```
pub trait Record: Default + 'static {
    /// Registers the record's column bindings.
    fn bind(bindings: &mut Bindings<Self>);

    /// The name used in error messages and logs.
    fn name() -> &'static str {
        let name = std::any::type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }
}

/// Cache of derived [`RecordDef`]s, keyed by record type.
#[derive(Default)]
pub struct Records {
    defs: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Records {
    pub fn new() -> Records {
        Records::default()
    }

    /// Returns the metadata of `R`, deriving it on first access.
    ///
    /// Derivation runs at most once per type. Failures are not cached.
    pub fn describe<R: Record>(&self) -> Result<Arc<RecordDef<R>>> {
        let id = TypeId::of::<R>();

        if let Some(def) = self
            .defs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return downcast(def.clone());
        }

        let mut defs = self.defs.write().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have derived it while we waited for the lock
        if let Some(def) = defs.get(&id) {
            return downcast(def.clone());
        }

        let def = Arc::new(RecordDef::<R>::derive()?);

        debug!(
            record = def.name(),
            fields = def.len(),
            primary_key = ?def.primary_key_keys().collect::<Vec<_>>(),
            "derived record metadata"
        );

        defs.insert(id, def.clone());
        Ok(def)
    }

    /// Number of record types described so far.
    pub fn len(&self) -> usize {
        self.defs.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn downcast<R: Record>(def: Arc<dyn Any + Send + Sync>) -> Result<Arc<RecordDef<R>>> {
    def.downcast::<RecordDef<R>>()
        .map_err(|_| err!("record cache entry for `{}` has the wrong type", R::name()))
}

impl fmt::Debug for Records {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Records").field("len", &self.len()).finish()
    }
}
