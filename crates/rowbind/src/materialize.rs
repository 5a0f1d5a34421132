//! Conversion of result rows into records.

use crate::{
    coerce::Coercions,
    record::{FieldDef, Record, RecordDef},
};

use rowbind_core::{err, stmt::ValueRecord, Error, Result};

/// How strictly result columns must cover a record's fields.
///
/// Result columns without a matching field are ignored under either policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnPolicy {
    /// Every writable field must appear among the result columns.
    #[default]
    Strict,

    /// Fields missing from the result keep their `Default` value.
    Lenient,
}

/// Turns the rows of one result set into records of type `R`.
///
/// Columns are matched to fields once, when the materializer is created.
pub struct Materializer<'a, R> {
    def: &'a RecordDef<R>,
    coercions: &'a Coercions,

    /// For each result column, the field it populates
    targets: Vec<Option<&'a FieldDef<R>>>,

    /// Writable fields with no result column
    missing: Vec<&'a str>,

    policy: ColumnPolicy,
}

impl<'a, R: Record> Materializer<'a, R> {
    pub fn new(
        def: &'a RecordDef<R>,
        coercions: &'a Coercions,
        policy: ColumnPolicy,
        columns: &[String],
    ) -> Materializer<'a, R> {
        let keys: Vec<String> = columns.iter().map(|column| column.to_lowercase()).collect();

        let targets = keys
            .iter()
            .map(|key| def.field(key).filter(|field| field.is_writable()))
            .collect();

        let missing = def
            .fields()
            .filter(|(key, field)| field.is_writable() && !keys.iter().any(|k| k == *key))
            .map(|(key, _)| key)
            .collect();

        Materializer {
            def,
            coercions,
            targets,
            missing,
            policy,
        }
    }

    /// Builds one record from `row`.
    pub fn materialize(&self, row: ValueRecord) -> Result<R> {
        if self.policy == ColumnPolicy::Strict {
            if let Some(key) = self.missing.first() {
                return Err(Error::missing_column(
                    *key,
                    format!("result set for `{}`", self.def.name()),
                ));
            }
        }

        let mut record = R::default();

        for (value, target) in row.into_iter().zip(&self.targets) {
            let Some(field) = target else {
                continue;
            };

            self.coercions
                .coerce(value, field.ty())
                .and_then(|value| field.set(&mut record, value))
                .map_err(|e| {
                    e.context(err!(
                        "failed to read column `{}` into `{}`",
                        field.key(),
                        self.def.name()
                    ))
                })?;
        }

        Ok(record)
    }
}
