use super::Record;
use crate::stmt::Primitive;

use rowbind_core::{
    stmt::{Type, Value},
    Result,
};

use std::sync::Arc;

pub(crate) type Getter<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;
pub(crate) type Setter<R> = Arc<dyn Fn(&mut R, Value) -> Result<()> + Send + Sync>;

/// Collects the column bindings a [`Record`] declares.
///
/// Keys are case-insensitive and stored lowercase. Conflicts between
/// bindings are reported when the record is described, not here.
pub struct Bindings<R> {
    /// Bindings embedded from base records. Resolved before `declared`.
    pub(super) inherited: Vec<Binding<R>>,

    pub(super) declared: Vec<Binding<R>>,
}

pub(super) struct Binding<R> {
    pub(super) key: String,
    pub(super) source: String,
    pub(super) ty: Type,
    pub(super) nullable: bool,
    pub(super) primary_key: bool,
    pub(super) defaultable: bool,
    pub(super) access: Access<R>,
}

pub(super) enum Access<R> {
    Field { get: Getter<R>, set: Setter<R> },
    Getter(Getter<R>),
    Setter(Setter<R>),
}

/// Returned by the binding methods to set per-key flags.
pub struct FieldBuilder<'a, R> {
    binding: &'a mut Binding<R>,
}

impl<R: Record> Bindings<R> {
    pub(crate) fn new() -> Bindings<R> {
        Bindings {
            inherited: vec![],
            declared: vec![],
        }
    }

    /// Binds `key` directly to a struct field.
    pub fn field<T>(
        &mut self,
        key: &str,
        name: &str,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
    ) -> FieldBuilder<'_, R>
    where
        T: Primitive + Clone + 'static,
    {
        self.push(Binding {
            key: key.to_lowercase(),
            source: format!("field `{}::{name}`", R::name()),
            ty: T::ty(),
            nullable: T::NULLABLE,
            primary_key: false,
            defaultable: false,
            access: Access::Field {
                get: Arc::new(move |record: &R| get(record).clone().into_value()),
                set: Arc::new(move |record: &mut R, value: Value| {
                    *get_mut(record) = T::load(value)?;
                    Ok(())
                }),
            },
        })
    }

    /// Binds `key` to a read method.
    pub fn getter<T>(&mut self, key: &str, name: &str, get: fn(&R) -> T) -> FieldBuilder<'_, R>
    where
        T: Primitive + 'static,
    {
        self.push(Binding {
            key: key.to_lowercase(),
            source: format!("getter `{}::{name}`", R::name()),
            ty: T::ty(),
            nullable: T::NULLABLE,
            primary_key: false,
            defaultable: false,
            access: Access::Getter(Arc::new(move |record: &R| get(record).into_value())),
        })
    }

    /// Binds `key` to a write method.
    pub fn setter<T>(
        &mut self,
        key: &str,
        name: &str,
        set: fn(&mut R, T),
    ) -> FieldBuilder<'_, R>
    where
        T: Primitive + 'static,
    {
        self.push(Binding {
            key: key.to_lowercase(),
            source: format!("setter `{}::{name}`", R::name()),
            ty: T::ty(),
            nullable: T::NULLABLE,
            primary_key: false,
            defaultable: false,
            access: Access::Setter(Arc::new(move |record: &mut R, value: Value| {
                set(record, T::load(value)?);
                Ok(())
            })),
        })
    }

    /// Embeds the bindings of base record `B`, reached through `project`.
    pub fn inherit<B: Record>(
        &mut self,
        project: fn(&R) -> &B,
        project_mut: fn(&mut R) -> &mut B,
    ) {
        let mut base = Bindings::<B>::new();
        B::bind(&mut base);

        let Bindings {
            inherited,
            declared,
        } = base;

        for binding in inherited.into_iter().chain(declared) {
            self.inherited.push(binding.project(project, project_mut));
        }
    }

    fn push(&mut self, binding: Binding<R>) -> FieldBuilder<'_, R> {
        let index = self.declared.len();
        self.declared.push(binding);

        FieldBuilder {
            binding: &mut self.declared[index],
        }
    }
}

impl<B: 'static> Binding<B> {
    fn project<R: 'static>(
        self,
        project: fn(&R) -> &B,
        project_mut: fn(&mut R) -> &mut B,
    ) -> Binding<R> {
        let wrap_get = |get: Getter<B>| -> Getter<R> {
            Arc::new(move |record: &R| get(project(record)))
        };
        let wrap_set = |set: Setter<B>| -> Setter<R> {
            Arc::new(move |record: &mut R, value: Value| set(project_mut(record), value))
        };

        Binding {
            key: self.key,
            source: self.source,
            ty: self.ty,
            nullable: self.nullable,
            primary_key: self.primary_key,
            defaultable: self.defaultable,
            access: match self.access {
                Access::Field { get, set } => Access::Field {
                    get: wrap_get(get),
                    set: wrap_set(set),
                },
                Access::Getter(get) => Access::Getter(wrap_get(get)),
                Access::Setter(set) => Access::Setter(wrap_set(set)),
            },
        }
    }
}

impl<R> FieldBuilder<'_, R> {
    /// Marks the key as part of the primary key.
    pub fn primary_key(self) -> Self {
        self.binding.primary_key = true;
        self
    }

    /// Marks the column as filled in by the database when the value is null.
    pub fn defaultable(self) -> Self {
        self.binding.defaultable = true;
        self
    }
}
