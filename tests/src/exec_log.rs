use rowbind_core::driver::Operation;
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything a connection was asked to do, shared between the connection
/// and the test inspecting it.
#[derive(Debug, Clone, Default)]
pub struct ExecLog {
    inner: Arc<Mutex<Entries>>,
}

#[derive(Debug, Default)]
struct Entries {
    ops: Vec<Operation>,
    list_tables: usize,
    list_columns: usize,
}

impl ExecLog {
    pub fn new() -> ExecLog {
        ExecLog::default()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.inner.lock().unwrap()
    }

    pub(crate) fn push(&self, op: Operation) {
        self.lock().ops.push(op);
    }

    pub(crate) fn record_list_tables(&self) {
        self.lock().list_tables += 1;
    }

    pub(crate) fn record_list_columns(&self) {
        self.lock().list_columns += 1;
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.lock().ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().ops.is_empty()
    }

    /// Number of table listings, one per catalog resolution
    pub fn list_tables_calls(&self) -> usize {
        self.lock().list_tables
    }

    /// Number of column listings, one per catalog resolution
    pub fn list_columns_calls(&self) -> usize {
        self.lock().list_columns
    }

    /// Total catalog round trips
    pub fn introspections(&self) -> usize {
        let entries = self.lock();
        entries.list_tables + entries.list_columns
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Operation) -> bool,
    {
        self.lock().ops.iter().filter(|op| predicate(op)).count()
    }

    pub fn has_insert(&self) -> bool {
        self.count(|op| matches!(op, Operation::Insert(_))) > 0
    }

    /// The SQL of every logged operation, oldest first
    pub fn sql(&self) -> Vec<String> {
        self.lock().ops.iter().map(|op| op.sql().to_string()).collect()
    }

    /// Remove and return the oldest operation
    pub fn pop(&self) -> Option<Operation> {
        let mut entries = self.lock();

        if entries.ops.is_empty() {
            None
        } else {
            Some(entries.ops.remove(0))
        }
    }

    /// Forget operations and introspection counts
    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.ops.clear();
        entries.list_tables = 0;
        entries.list_columns = 0;
    }
}
