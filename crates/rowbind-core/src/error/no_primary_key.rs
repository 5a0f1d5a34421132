use super::Error;

/// Error when an update or delete is requested for a record type without a
/// primary key. Such a statement would not be scoped to a single row.
#[derive(Debug)]
pub(super) struct NoPrimaryKeyError {
    record: Box<str>,
}

impl std::error::Error for NoPrimaryKeyError {}

impl core::fmt::Display for NoPrimaryKeyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "record type `{}` has no primary key", self.record)
    }
}

impl Error {
    /// Creates a no primary key error for the named record type.
    pub fn no_primary_key(record: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NoPrimaryKey(NoPrimaryKeyError {
            record: record.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a no primary key error.
    pub fn is_no_primary_key(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::NoPrimaryKey(_)))
    }
}
