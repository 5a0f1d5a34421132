use super::Table;
use crate::{materialize::Materializer, record::Record};

use rowbind_core::{driver::ResultSet, Error, Result};

use std::collections::HashSet;

impl<R: Record> Table<R> {
    /// Returns the first row, if any.
    pub async fn first(&self, rows: ResultSet) -> Result<Option<R>> {
        Ok(self.read(rows, Some(1)).await?.pop())
    }

    /// Returns the first row, failing when there is none.
    pub async fn first_or_err(&self, rows: ResultSet) -> Result<R> {
        self.first(rows).await?.ok_or_else(Error::empty_result)
    }

    /// Returns the only row, if any, failing when there is more than one.
    pub async fn unique(&self, rows: ResultSet) -> Result<Option<R>> {
        let mut records = self.read(rows, Some(2)).await?;

        if records.len() > 1 {
            return Err(Error::too_many_rows(1));
        }

        Ok(records.pop())
    }

    /// Returns the only row, failing unless there is exactly one.
    pub async fn unique_or_err(&self, rows: ResultSet) -> Result<R> {
        self.unique(rows).await?.ok_or_else(Error::empty_result)
    }

    /// Returns every row, failing when there are more than `max`.
    pub async fn list(&self, rows: ResultSet, max: Option<usize>) -> Result<Vec<R>> {
        // One extra row is enough to tell that `max` was exceeded
        let records = self.read(rows, max.and_then(|max| max.checked_add(1))).await?;

        match max {
            Some(max) if records.len() > max => Err(Error::too_many_rows(max)),
            _ => Ok(records),
        }
    }

    /// Returns the rows with distinct primary keys, keeping the first of each.
    /// Fails when there are more than `max` distinct records.
    pub async fn set(&self, mut rows: ResultSet, max: Option<usize>) -> Result<Vec<R>> {
        let def = self.describe()?;
        let columns = rows.columns_arc();
        let materializer = Materializer::new(
            &def,
            self.db.coercions(),
            self.db.column_policy(),
            &columns,
        );

        let mut seen = HashSet::new();
        let mut records = vec![];

        while let Some(row) = rows.next().await {
            let record = materializer.materialize(row?)?;

            if !seen.insert(def.primary_key(&record)?) {
                continue;
            }

            if max.is_some_and(|max| records.len() == max) {
                return Err(Error::too_many_rows(records.len()));
            }

            records.push(record);
        }

        Ok(records)
    }

    /// Materializes up to `limit` rows.
    async fn read(&self, mut rows: ResultSet, limit: Option<usize>) -> Result<Vec<R>> {
        let def = self.describe()?;
        let columns = rows.columns_arc();
        let materializer = Materializer::new(
            &def,
            self.db.coercions(),
            self.db.column_policy(),
            &columns,
        );

        let mut records = vec![];

        while limit.map_or(true, |limit| records.len() < limit) {
            let Some(row) = rows.next().await else {
                break;
            };

            records.push(materializer.materialize(row?)?);
        }

        Ok(records)
    }
}
