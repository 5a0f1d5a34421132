use super::Error;
use crate::stmt::Type;

/// Error when a value cannot be converted to the requested type.
#[derive(Debug)]
pub(super) struct CoercionError {
    from: Type,
    to: Type,
    reason: Option<Box<str>>,
}

impl std::error::Error for CoercionError {}

impl core::fmt::Display for CoercionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot coerce {:?} to {:?}", self.from, self.to)?;
        if let Some(ref reason) = self.reason {
            write!(f, " ({reason})")?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a coercion error for a conversion that is not supported.
    pub fn coercion(from: Type, to: Type) -> Error {
        Error::from(super::ErrorKind::Coercion(CoercionError {
            from,
            to,
            reason: None,
        }))
    }

    /// Creates a coercion error for a supported conversion that failed for the
    /// given value, such as a string that does not parse as an integer.
    pub fn coercion_failed(from: Type, to: Type, reason: impl core::fmt::Display) -> Error {
        Error::from(super::ErrorKind::Coercion(CoercionError {
            from,
            to,
            reason: Some(reason.to_string().into()),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a coercion error.
    pub fn is_coercion(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Coercion(_)))
    }
}
