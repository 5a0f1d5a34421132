use super::Error;

/// Error when a key has no counterpart on the other side of a mapping.
///
/// This occurs when:
/// - A record binds a key that the table catalog does not have
/// - A result row does not surface a column for a key the record binds
#[derive(Debug)]
pub(super) struct MissingColumnError {
    key: Box<str>,
    source: Box<str>,
}

impl std::error::Error for MissingColumnError {}

impl core::fmt::Display for MissingColumnError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing column `{}` in {}", self.key, self.source)
    }
}

impl Error {
    /// Creates a missing column error.
    ///
    /// `source` names where the column was looked for, such as ``table `test.character` ``
    /// or ``result set for `Character` ``.
    pub fn missing_column(key: impl Into<String>, source: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingColumn(MissingColumnError {
            key: key.into().into(),
            source: source.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a missing column error.
    pub fn is_missing_column(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingColumn(_)))
    }
}
