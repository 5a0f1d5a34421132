use crate::ExecLog;

use rowbind_core::{
    async_trait,
    driver::{Capability, Connection, Operation, Response, ResultSet},
    schema::ColumnInfo,
    stmt::{Value, ValueRecord},
    Result,
};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// An in-process connection serving canned catalogs and responses.
///
/// Clones share tables, queued responses and the log, so several tasks can
/// act as separate connections to the same database.
#[derive(Debug, Clone)]
pub struct MockConnection {
    capability: &'static Capability,
    state: Arc<Mutex<State>>,
    log: ExecLog,
}

#[derive(Debug, Default)]
struct State {
    tables: Vec<MockTable>,
    responses: VecDeque<Canned>,
}

#[derive(Debug)]
struct MockTable {
    schema: Option<String>,
    name: String,
    columns: Vec<ColumnInfo>,
}

#[derive(Debug)]
enum Canned {
    Count(u64),
    Rows(Vec<String>, Vec<Vec<Value>>),
}

impl MockConnection {
    pub fn new(capability: &'static Capability) -> MockConnection {
        MockConnection {
            capability,
            state: Arc::default(),
            log: ExecLog::new(),
        }
    }

    pub fn postgresql() -> MockConnection {
        MockConnection::new(&Capability::POSTGRESQL)
    }

    pub fn sqlite() -> MockConnection {
        MockConnection::new(&Capability::SQLITE)
    }

    /// Adds a table. `name` is the physical name with its database casing.
    pub fn with_table(
        self,
        schema: Option<&str>,
        name: &str,
        columns: impl IntoIterator<Item = ColumnInfo>,
    ) -> MockConnection {
        self.state.lock().unwrap().tables.push(MockTable {
            schema: schema.map(str::to_string),
            name: name.to_string(),
            columns: columns.into_iter().collect(),
        });
        self
    }

    /// Queues the rows returned by the next query or `RETURNING` insert.
    pub fn push_rows(&self, columns: &[&str], rows: Vec<Vec<Value>>) {
        let columns = columns.iter().map(|column| column.to_string()).collect();
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Canned::Rows(columns, rows));
    }

    /// Queues the row count returned by the next statement.
    pub fn push_count(&self, count: u64) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Canned::Count(count));
    }

    pub fn log(&self) -> ExecLog {
        self.log.clone()
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn capability(&self) -> &'static Capability {
        self.capability
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        let wants_rows = match &op {
            Operation::Execute(_) => false,
            Operation::Insert(op) => op.returning,
            Operation::Query(_) => true,
        };

        self.log.push(op);

        let canned = self.state.lock().unwrap().responses.pop_front();

        Ok(match canned {
            Some(Canned::Count(count)) => Response::count(count),
            Some(Canned::Rows(columns, rows)) => Response::cursor(ResultSet::from_rows(
                columns,
                rows.into_iter().map(ValueRecord::from_vec).collect(),
            )),
            None if wants_rows => Response::cursor(ResultSet::from_rows(vec![], vec![])),
            None => Response::count(1),
        })
    }

    async fn list_tables(&mut self, schema: Option<&str>) -> Result<Vec<String>> {
        self.log.record_list_tables();

        // Let concurrent resolutions of the same table overlap
        tokio::task::yield_now().await;

        let state = self.state.lock().unwrap();
        Ok(state
            .tables
            .iter()
            .filter(|table| table.schema.as_deref() == schema)
            .map(|table| table.name.clone())
            .collect())
    }

    async fn list_columns(
        &mut self,
        schema: Option<&str>,
        table: &str,
    ) -> Result<Vec<ColumnInfo>> {
        self.log.record_list_columns();

        let state = self.state.lock().unwrap();
        Ok(state
            .tables
            .iter()
            .find(|t| t.schema.as_deref() == schema && t.name == table)
            .map(|t| t.columns.clone())
            .unwrap_or_default())
    }
}
