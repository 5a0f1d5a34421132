use super::{field_def::FieldDef, Bindings, PrimaryKey, Record};

use indexmap::{map::Entry, IndexMap};
use rowbind_core::{Error, Result};

use std::fmt;

/// The derived metadata of a record type: its fields keyed by lowercase
/// column key, in declaration order with inherited fields first.
pub struct RecordDef<R> {
    name: &'static str,
    fields: IndexMap<String, FieldDef<R>>,

    /// Primary key column keys, sorted
    primary_key: Vec<String>,
}

impl<R: Record> RecordDef<R> {
    pub(super) fn derive() -> Result<RecordDef<R>> {
        let name = R::name();

        let mut bindings = Bindings::<R>::new();
        R::bind(&mut bindings);

        let Bindings {
            inherited,
            declared,
        } = bindings;

        let mut fields = IndexMap::<String, FieldDef<R>>::new();

        for binding in inherited.into_iter().chain(declared) {
            match fields.entry(binding.key.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(FieldDef::new(name, binding));
                }
                Entry::Occupied(mut entry) => {
                    entry.get_mut().merge(binding)?;
                }
            }
        }

        if fields.is_empty() {
            return Err(Error::configuration(format!(
                "record type `{name}` declares no bindings"
            )));
        }

        let mut primary_key = vec![];

        for field in fields.values().filter(|field| field.is_primary_key()) {
            if !field.is_readable() {
                return Err(Error::configuration(format!(
                    "primary key `{}` of `{name}` must be readable",
                    field.key()
                )));
            }
            primary_key.push(field.key().to_string());
        }

        primary_key.sort();

        Ok(RecordDef {
            name,
            fields,
            primary_key,
        })
    }
}

impl<R> RecordDef<R> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Iterates `(key, field)` pairs.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = (&str, &FieldDef<R>)> + '_ {
        self.fields.iter().map(|(key, field)| (&key[..], field))
    }

    pub fn field(&self, key: &str) -> Option<&FieldDef<R>> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty()
    }

    /// Primary key column keys in sorted order.
    pub fn primary_key_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.primary_key.iter().map(String::as_str)
    }

    pub fn primary_key_fields(&self) -> impl Iterator<Item = &FieldDef<R>> + '_ {
        self.primary_key.iter().filter_map(|key| self.fields.get(key))
    }

    /// Reads the primary key values of `record`.
    pub fn primary_key(&self, record: &R) -> Result<PrimaryKey> {
        if !self.has_primary_key() {
            return Err(Error::no_primary_key(self.name));
        }

        self.primary_key_fields()
            .map(|field| field.get(record))
            .collect::<Result<Vec<_>>>()
            .map(PrimaryKey::new)
    }

    /// A record is stored iff it has a primary key with no null component.
    pub fn is_in_database(&self, record: &R) -> bool {
        match self.primary_key(record) {
            Ok(key) => !key.has_null(),
            Err(_) => false,
        }
    }
}

impl<R> fmt::Debug for RecordDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordDef")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("primary_key", &self.primary_key)
            .finish()
    }
}
