mod exec_log;
pub use exec_log::ExecLog;

mod logging_connection;
pub use logging_connection::LoggingConnection;

mod mock;
pub use mock::MockConnection;

pub mod prelude;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use std_util::*;

use std::sync::Once;

/// Installs a tracing subscriber honoring `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
