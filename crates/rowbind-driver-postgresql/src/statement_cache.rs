use std::collections::HashMap;

use postgres::{Error, Statement};
use tokio_postgres::Client;

/// Prepared statements keyed by their SQL text.
///
/// Prepared statements carry the result columns, which a result set needs even
/// when no rows come back.
#[derive(Debug, Clone, Default)]
pub struct StatementCache {
    map: HashMap<String, Statement>,
}

impl StatementCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str) -> Option<Statement> {
        self.map.get(query).cloned()
    }

    pub async fn prepare(&mut self, client: &Client, query: &str) -> Result<Statement, Error> {
        if let Some(statement) = self.get(query) {
            return Ok(statement);
        }

        let statement = client.prepare(query).await?;
        self.map.insert(query.to_string(), statement.clone());
        Ok(statement)
    }
}
