use super::bindings::{Access, Binding, Getter, Setter};

use rowbind_core::{
    stmt::{Type, Value},
    Error, Result,
};

use std::fmt;

/// How one column key maps onto a record type.
pub struct FieldDef<R> {
    record: &'static str,
    key: String,
    ty: Type,
    nullable: bool,
    primary_key: bool,
    defaultable: bool,

    /// Source of each binding that contributed to this field
    field: Option<String>,
    getter: Option<String>,
    setter: Option<String>,

    get: Option<Getter<R>>,
    set: Option<Setter<R>>,
}

impl<R> FieldDef<R> {
    pub(super) fn new(record: &'static str, binding: Binding<R>) -> FieldDef<R> {
        let mut def = FieldDef {
            record,
            key: binding.key,
            ty: binding.ty,
            nullable: binding.nullable,
            primary_key: binding.primary_key,
            defaultable: binding.defaultable,
            field: None,
            getter: None,
            setter: None,
            get: None,
            set: None,
        };

        match binding.access {
            Access::Field { get, set } => {
                def.field = Some(binding.source);
                def.get = Some(get);
                def.set = Some(set);
            }
            Access::Getter(get) => {
                def.getter = Some(binding.source);
                def.get = Some(get);
            }
            Access::Setter(set) => {
                def.setter = Some(binding.source);
                def.set = Some(set);
            }
        }

        def
    }

    /// Folds another binding for the same key into this one.
    ///
    /// Only a getter and a setter may share a key, and only when their
    /// value types agree.
    pub(super) fn merge(&mut self, binding: Binding<R>) -> Result<()> {
        let existing = self
            .field
            .as_ref()
            .or(match binding.access {
                Access::Field { .. } => self.getter.as_ref().or(self.setter.as_ref()),
                Access::Getter(_) => self.getter.as_ref(),
                Access::Setter(_) => self.setter.as_ref(),
            });

        if let Some(existing) = existing {
            return Err(Error::field_mapping_conflict(
                &self.key,
                existing.clone(),
                binding.source,
            ));
        }

        if self.ty != binding.ty {
            let existing = self.getter.as_ref().or(self.setter.as_ref());
            return Err(Error::configuration(format!(
                "{} and {} of key `{}` disagree on type: {:?} vs {:?}",
                existing.map(String::as_str).unwrap_or("binding"),
                binding.source,
                self.key,
                self.ty,
                binding.ty,
            )));
        }

        self.nullable |= binding.nullable;
        self.primary_key |= binding.primary_key;
        self.defaultable |= binding.defaultable;

        match binding.access {
            Access::Getter(get) => {
                self.getter = Some(binding.source);
                self.get = Some(get);
            }
            Access::Setter(set) => {
                self.setter = Some(binding.source);
                self.set = Some(set);
            }
            Access::Field { .. } => unreachable!("field bindings always conflict"),
        }

        Ok(())
    }

    /// The lowercase column key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The host type of the bound value.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Whether a null value is left out of inserts so the database fills it in.
    pub fn is_defaultable(&self) -> bool {
        self.defaultable
    }

    pub fn is_readable(&self) -> bool {
        self.get.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.set.is_some()
    }

    /// Reads the value from `record`.
    pub fn get(&self, record: &R) -> Result<Value> {
        match &self.get {
            Some(get) => Ok(get(record)),
            None => Err(Error::configuration(format!(
                "key `{}` of `{}` is write-only",
                self.key, self.record
            ))),
        }
    }

    /// Writes `value` to `record`. The value must already have the field's type.
    pub fn set(&self, record: &mut R, value: Value) -> Result<()> {
        match &self.set {
            Some(set) => set(record, value),
            None => Err(Error::configuration(format!(
                "key `{}` of `{}` is read-only",
                self.key, self.record
            ))),
        }
    }
}

impl<R> fmt::Debug for FieldDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("key", &self.key)
            .field("ty", &self.ty)
            .field("nullable", &self.nullable)
            .field("primary_key", &self.primary_key)
            .field("defaultable", &self.defaultable)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}
