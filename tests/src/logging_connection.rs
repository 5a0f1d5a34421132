use crate::ExecLog;

use rowbind_core::{
    async_trait,
    driver::{Capability, Connection, Operation, Response},
    schema::ColumnInfo,
    Result,
};

/// A connection wrapper that logs every operation and catalog query.
#[derive(Debug)]
pub struct LoggingConnection {
    /// The connection that actually executes operations
    inner: Box<dyn Connection>,

    log: ExecLog,
}

impl LoggingConnection {
    pub fn new(inner: impl Connection) -> Self {
        Self {
            inner: Box::new(inner),
            log: ExecLog::new(),
        }
    }

    /// Get a handle to the operations log
    pub fn log(&self) -> ExecLog {
        self.log.clone()
    }
}

#[async_trait]
impl Connection for LoggingConnection {
    fn capability(&self) -> &'static Capability {
        self.inner.capability()
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        self.log.push(op.clone());
        self.inner.exec(op).await
    }

    async fn list_tables(&mut self, schema: Option<&str>) -> Result<Vec<String>> {
        self.log.record_list_tables();
        self.inner.list_tables(schema).await
    }

    async fn list_columns(
        &mut self,
        schema: Option<&str>,
        table: &str,
    ) -> Result<Vec<ColumnInfo>> {
        self.log.record_list_columns();
        self.inner.list_columns(schema, table).await
    }
}
