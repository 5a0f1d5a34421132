use crate::LoggingConnection;

use rowbind::sqlite::Connection;

/// DDL shared by the SQLite scenarios.
pub const CHARACTER_DDL: &str = "
    CREATE TABLE Character (
        characterId INTEGER PRIMARY KEY AUTOINCREMENT,
        Name VARCHAR(64) NOT NULL,
        level INTEGER NOT NULL DEFAULT 1,
        class TEXT NOT NULL DEFAULT 'Warrior',
        created TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        guild TEXT
    );
";

/// Opens a fresh in-memory database, runs `ddl` and wraps the connection
/// so tests can inspect what rowbind sent.
pub fn connect(ddl: &str) -> LoggingConnection {
    crate::init_tracing();

    let connection = Connection::in_memory().unwrap();
    connection.execute_batch(ddl).unwrap();
    LoggingConnection::new(connection)
}
