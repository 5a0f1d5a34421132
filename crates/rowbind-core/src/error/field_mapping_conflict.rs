use super::Error;

/// Error when two bindings of a record type claim the same column key.
#[derive(Debug)]
pub(super) struct FieldMappingConflictError {
    key: Box<str>,
    first: Box<str>,
    second: Box<str>,
}

impl std::error::Error for FieldMappingConflictError {}

impl core::fmt::Display for FieldMappingConflictError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "conflicting bindings for key `{}`: {} and {}",
            self.key, self.first, self.second
        )
    }
}

impl Error {
    /// Creates a field mapping conflict error.
    ///
    /// `first` and `second` describe the two bindings, for example
    /// ``field `name` `` and ``getter `display_name` ``.
    pub fn field_mapping_conflict(
        key: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::FieldMappingConflict(
            FieldMappingConflictError {
                key: key.into().into(),
                first: first.into().into(),
                second: second.into().into(),
            },
        ))
    }

    /// Returns `true` if this error, or any error it wraps, is a field mapping conflict.
    pub fn is_field_mapping_conflict(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::FieldMappingConflict(_)))
    }
}
