use super::{Statement, TableName};

/// A table with the alias it is referenced by in a joined select.
#[derive(Debug, Clone)]
pub struct Aliased {
    pub table: TableName,
    pub alias: String,
}

/// One `JOIN <table> AS <alias> ON (<on>)` entry.
#[derive(Debug, Clone)]
pub struct Join {
    pub table: Aliased,

    /// Join criteria, emitted verbatim
    pub on: String,
}

/// Selects every column of a root table and its joined tables.
///
/// Aliases are emitted unquoted so that hand written join criteria and
/// clauses can refer to them.
#[derive(Debug, Clone)]
pub struct JoinedSelect {
    pub from: Aliased,
    pub joins: Vec<Join>,
    pub clause: String,
}

impl From<JoinedSelect> for Statement {
    fn from(value: JoinedSelect) -> Self {
        Self::JoinedSelect(value)
    }
}
