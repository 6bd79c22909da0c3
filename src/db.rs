//! SQLite pool construction.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Pragmas applied to every connection handed out by the pool.
#[derive(Debug, Clone, Copy)]
pub struct SqlitePragmas {
    pub journal_wal: bool,
    pub foreign_keys: bool,
    pub busy_timeout: Option<Duration>,
}

impl Default for SqlitePragmas {
    fn default() -> Self {
        Self {
            journal_wal: true,
            foreign_keys: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl SqlitePragmas {
    fn statements(&self) -> String {
        let mut sql = String::new();
        if self.journal_wal {
            sql.push_str("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL; ");
        }
        if self.foreign_keys {
            // Deleting a customer relies on ON DELETE CASCADE / SET NULL.
            sql.push_str("PRAGMA foreign_keys = ON; ");
        }
        if let Some(timeout) = self.busy_timeout {
            sql.push_str(&format!("PRAGMA busy_timeout = {};", timeout.as_millis()));
        }
        sql
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let sql = self.statements();
        if sql.is_empty() {
            return Ok(());
        }
        conn.batch_execute(&sql)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the pool used by the server and the seeding tool.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    establish_connection_pool_with(database_url, SqlitePragmas::default())
}

pub fn establish_connection_pool_with(
    database_url: &str,
    pragmas: SqlitePragmas,
) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .connection_customizer(Box::new(pragmas))
        .build(manager);
    if let Err(err) = &pool {
        log::error!("Failed to build connection pool for {database_url}: {err}");
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pragmas_enable_foreign_keys() {
        let sql = SqlitePragmas::default().statements();
        assert!(sql.contains("foreign_keys = ON"));
        assert!(sql.contains("busy_timeout = 30000"));
    }

    #[test]
    fn disabled_pragmas_produce_no_sql() {
        let pragmas = SqlitePragmas {
            journal_wal: false,
            foreign_keys: false,
            busy_timeout: None,
        };
        assert!(pragmas.statements().is_empty());
    }
}
