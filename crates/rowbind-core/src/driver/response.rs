use crate::{
    stmt::{RowStream, ValueRecord},
    Result,
};

use std::sync::Arc;

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Operation result, as a cursor over rows
    Cursor(ResultSet),
}

/// A cursor over the rows of a query.
#[derive(Debug)]
pub struct ResultSet {
    columns: Arc<[String]>,
    rows: RowStream,
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn cursor(result_set: ResultSet) -> Self {
        Self {
            rows: Rows::Cursor(result_set),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_cursor(&self) -> bool {
        matches!(self, Self::Cursor(_))
    }

    /// Returns the affected row count. A cursor is drained and its rows counted.
    pub async fn into_count(self) -> Result<u64> {
        match self {
            Rows::Count(count) => Ok(count),
            Rows::Cursor(result_set) => Ok(result_set.rows.collect().await?.len() as u64),
        }
    }

    /// Returns the cursor, failing if the operation only reported a count.
    pub fn into_cursor(self) -> Result<ResultSet> {
        match self {
            Rows::Cursor(result_set) => Ok(result_set),
            Rows::Count(count) => {
                crate::bail!("expected a result set; the statement affected {count} rows")
            }
        }
    }
}

impl ResultSet {
    pub fn new(columns: impl Into<Arc<[String]>>, rows: impl Into<RowStream>) -> ResultSet {
        ResultSet {
            columns: columns.into(),
            rows: rows.into(),
        }
    }

    /// Builds a result set from buffered rows.
    pub fn from_rows(columns: Vec<String>, rows: Vec<ValueRecord>) -> ResultSet {
        ResultSet::new(columns, RowStream::from_vec(rows))
    }

    /// The column names as reported by the database.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// A shared handle to the column names.
    pub fn columns_arc(&self) -> Arc<[String]> {
        self.columns.clone()
    }

    /// Returns the next row
    pub async fn next(&mut self) -> Option<Result<ValueRecord>> {
        self.rows.next().await
    }

    /// Reads every remaining row
    pub async fn collect(self) -> Result<Vec<ValueRecord>> {
        self.rows.collect().await
    }
}
