use super::Error;

/// Error when the database catalog has no table matching the requested name.
#[derive(Debug)]
pub(super) struct TableNotFoundError {
    schema: Option<Box<str>>,
    table: Box<str>,
}

impl std::error::Error for TableNotFoundError {}

impl core::fmt::Display for TableNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("table does not exist: ")?;
        if let Some(ref schema) = self.schema {
            write!(f, "{schema}.")?;
        }
        f.write_str(&self.table)
    }
}

impl Error {
    /// Creates a table not found error.
    pub fn table_not_found(schema: Option<&str>, table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TableNotFound(TableNotFoundError {
            schema: schema.map(Into::into),
            table: table.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a table not found error.
    pub fn is_table_not_found(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::TableNotFound(_)))
    }
}
