use super::Error;

/// Error when a result set holds fewer or more rows than the caller asserted.
#[derive(Debug)]
pub(super) enum CardinalityError {
    /// At least one row was required and none were returned.
    Empty,

    /// At most `max` rows were allowed and more were returned.
    TooMany { max: usize },
}

impl std::error::Error for CardinalityError {}

impl core::fmt::Display for CardinalityError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            CardinalityError::Empty => {
                f.write_str("result set is empty; expected at least one row")
            }
            CardinalityError::TooMany { max: 1 } => {
                f.write_str("result set contains more than one row")
            }
            CardinalityError::TooMany { max } => {
                write!(f, "result set contains more than {max} rows")
            }
        }
    }
}

impl Error {
    /// Creates a cardinality error for an empty result set.
    pub fn empty_result() -> Error {
        Error::from(super::ErrorKind::Cardinality(CardinalityError::Empty))
    }

    /// Creates a cardinality error for a result set exceeding `max` rows.
    pub fn too_many_rows(max: usize) -> Error {
        Error::from(super::ErrorKind::Cardinality(CardinalityError::TooMany {
            max,
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a cardinality error.
    pub fn is_cardinality(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Cardinality(_)))
    }
}
