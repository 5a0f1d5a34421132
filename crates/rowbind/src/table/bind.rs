use super::{InsertPlan, Table};
use crate::record::Record;

use rowbind_core::{
    err,
    schema::{SqlType, TableCatalog},
    stmt::{DataValue, ValueRecord},
    Error, Result,
};
use tracing::trace;

impl<R: Record> Table<R> {
    /// Reads the values of `keys` from `record`, coerced to their columns'
    /// host types, in the order of `keys`.
    pub fn bind_values(
        &self,
        catalog: &TableCatalog,
        record: &R,
        keys: &[String],
    ) -> Result<Vec<DataValue>> {
        let def = self.describe()?;
        let coercions = self.db.coercions();

        keys.iter()
            .map(|key| {
                let column = catalog.column(key).ok_or_else(|| {
                    Error::missing_column(
                        key.as_str(),
                        format!("table `{}`", catalog.qualified_name()),
                    )
                })?;

                let field = def.field(key).ok_or_else(|| {
                    Error::missing_column(key.as_str(), format!("record `{}`", def.name()))
                })?;

                let value = field.get(record)?;

                let bound = match &column.sql_type {
                    SqlType::Array(element) => coercions
                        .coerce(value, &column.sql_type.host_type())
                        .and_then(|value| DataValue::array(value, (**element).clone())),
                    sql_type => coercions
                        .coerce(value, &sql_type.host_type())
                        .map(|value| DataValue::scalar(value, sql_type.clone())),
                };

                let bound = bound.map_err(|e| {
                    e.context(err!(
                        "failed to bind `{}.{}` (key `{key}`)",
                        catalog.qualified_name(),
                        column.real_name
                    ))
                })?;

                trace!(key = %key, value = ?bound.value, sql_type = ?bound.sql_type, "bind");

                Ok(bound)
            })
            .collect()
    }

    /// Writes the generated columns of a returned row back into `record`.
    pub(super) fn write_generated(
        &self,
        plan: &InsertPlan,
        columns: &[String],
        row: ValueRecord,
        record: &mut R,
    ) -> Result<()> {
        let def = self.describe()?;

        for (column, value) in columns.iter().zip(row) {
            let key = column.to_lowercase();

            if !plan.generated.contains(&key) {
                continue;
            }

            let Some(field) = def.field(&key) else {
                continue;
            };

            self.db
                .coercions()
                .coerce(value, field.ty())
                .and_then(|value| field.set(record, value))
                .map_err(|e| {
                    e.context(err!(
                        "failed to write generated key `{key}` into `{}`",
                        def.name()
                    ))
                })?;
        }

        Ok(())
    }
}
