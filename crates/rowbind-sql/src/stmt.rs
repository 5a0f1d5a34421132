mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod joined_select;
pub use joined_select::{Aliased, Join, JoinedSelect};

mod next_val;
pub use next_val::NextVal;

mod select;
pub use select::Select;

mod table_name;
pub use table_name::TableName;

mod update;
pub use update::Update;

#[derive(Debug, Clone)]
pub enum Statement {
    Delete(Delete),
    Insert(Insert),
    JoinedSelect(JoinedSelect),
    NextVal(NextVal),
    Select(Select),
    Update(Update),
}

impl Statement {
    pub fn is_insert(&self) -> bool {
        matches!(self, Statement::Insert(_))
    }

    /// Returns the number of returned columns within the statement (if one exists).
    pub fn returning_len(&self) -> Option<usize> {
        match self {
            Statement::Insert(insert) if !insert.returning.is_empty() => {
                Some(insert.returning.len())
            }
            _ => None,
        }
    }
}
