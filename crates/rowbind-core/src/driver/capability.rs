/// The SQL dialect a connection speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlFlavor {
    Postgresql,
    Sqlite,
}

#[derive(Debug)]
pub struct Capability {
    /// SQL dialect used when serializing statements.
    pub flavor: SqlFlavor,

    /// Supports `INSERT ... RETURNING`, used to read generated keys.
    pub returning: bool,

    /// Supports native array columns.
    pub arrays: bool,

    /// Supports `nextval()` on named sequences.
    pub sequences: bool,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        flavor: SqlFlavor::Sqlite,
        returning: true,
        arrays: false,
        sequences: false,
    };

    /// PostgreSQL capabilities.
    pub const POSTGRESQL: Self = Self {
        flavor: SqlFlavor::Postgresql,
        returning: true,
        arrays: true,
        sequences: true,
    };
}
