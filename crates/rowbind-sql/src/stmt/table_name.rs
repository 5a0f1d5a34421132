use std::fmt;

/// A possibly schema-qualified relation name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    pub schema: Option<String>,
    pub name: String,
}

impl TableName {
    pub fn new(schema: Option<&str>, name: impl Into<String>) -> TableName {
        TableName {
            schema: schema.filter(|s| !s.is_empty()).map(str::to_string),
            name: name.into(),
        }
    }
}

impl From<&str> for TableName {
    fn from(value: &str) -> Self {
        TableName::new(None, value)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{schema}.")?;
        }
        f.write_str(&self.name)
    }
}
