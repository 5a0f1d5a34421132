use super::{Db, Shared};
use crate::{
    catalog::Catalog,
    coerce::{Coerce, Coercions},
    joined::is_plain_identifier,
    materialize::ColumnPolicy,
    record::Records,
    table::Plans,
    Result,
};

use rowbind_core::{stmt::Type, Error};

#[derive(Debug, Default)]
pub struct Builder {
    schema: Option<String>,
    policy: ColumnPolicy,
    allow_missing_tables: bool,
    coercions: Coercions,
}

impl Builder {
    /// Qualify tables and sequences with `schema`.
    pub fn schema(&mut self, schema: impl Into<String>) -> &mut Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set how result columns must cover record fields. Defaults to [`ColumnPolicy::Strict`].
    pub fn column_policy(&mut self, policy: ColumnPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    /// Resolve missing tables to an empty catalog instead of failing.
    ///
    /// The empty catalog is not cached, so the table is looked up again on
    /// the next access.
    pub fn allow_missing_tables(&mut self, allow: bool) -> &mut Self {
        self.allow_missing_tables = allow;
        self
    }

    /// Register `coercer` for values of type `ty`, replacing the built-in one.
    pub fn coercer(&mut self, ty: Type, coercer: impl Coerce) -> &mut Self {
        self.coercions.register(ty, coercer);
        self
    }

    /// Builds a `Db`. The builder keeps its settings, so it can build again.
    pub fn build(&mut self) -> Result<Db> {
        if let Some(schema) = &self.schema {
            validate_schema(schema)?;
        }

        Ok(Db::from_shared(Shared {
            schema: self.schema.clone(),
            policy: self.policy,
            coercions: self.coercions.clone(),
            records: Records::new(),
            catalog: Catalog::new(self.allow_missing_tables),
            plans: Plans::default(),
        }))
    }
}

fn validate_schema(schema: &str) -> Result<()> {
    if is_plain_identifier(schema) {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "schema name `{schema}` is not a plain identifier"
        )))
    }
}
