use super::{Flavor, Formatter, ToSql};

/// Collects statement parameters as placeholders are written.
pub trait Params {
    /// Records that the next placeholder binds `column`.
    fn push(&mut self, column: &str) -> Placeholder;
}

/// A positional parameter, numbered from 1.
pub struct Placeholder(pub usize);

/// Collects the bound column names in placeholder order.
impl Params for Vec<String> {
    fn push(&mut self, column: &str) -> Placeholder {
        self.push(column.to_string());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        // Writing to a `String` cannot fail
        let _ = match f.serializer.flavor {
            Flavor::Postgresql => write!(f.dst, "${}", self.0),
            Flavor::Sqlite => write!(f.dst, "?{}", self.0),
        };
    }
}
