//! SQLite connection pool
//!
//! r2d2 pool over plain SQLite files. Every connection gets the same pragma
//! set on checkout from the manager: WAL journaling so readers never block
//! the writer, `synchronous=NORMAL`, and a busy timeout so concurrent
//! writers queue instead of failing with `SQLITE_BUSY`.

use std::path::Path;
use std::time::{Duration, Instant};

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use routewatch_domain::Result;
use rusqlite::Connection;
use tracing::{debug, info, instrument, warn};

use crate::errors::InfraError;

/// Connection checked out of a [`SqlitePool`].
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Pool configuration.
#[derive(Debug, Clone)]
pub struct SqlitePoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,

    /// How long a checkout may wait for a free connection
    pub connection_timeout: Duration,

    /// Busy timeout for SQLite lock contention
    pub busy_timeout: Duration,

    /// Enable WAL journal mode
    pub enable_wal: bool,
}

impl Default for SqlitePoolConfig {
    fn default() -> Self {
        Self {
            max_size: 4,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(5000),
            enable_wal: true,
        }
    }
}

/// Apply connection-level pragmas.
pub fn apply_connection_pragmas(conn: &Connection, config: &SqlitePoolConfig) -> rusqlite::Result<()> {
    let mut pragma_sql = String::new();

    if config.enable_wal {
        pragma_sql.push_str("PRAGMA journal_mode=WAL;\n");
        pragma_sql.push_str("PRAGMA wal_autocheckpoint=1000;\n");
    }
    pragma_sql.push_str("PRAGMA synchronous=NORMAL;\n");

    conn.execute_batch(&pragma_sql)?;
    conn.busy_timeout(config.busy_timeout)
}

/// r2d2-backed pool of SQLite connections to one database file.
#[derive(Debug, Clone)]
pub struct SqlitePool {
    pool: Pool<SqliteConnectionManager>,
    config: SqlitePoolConfig,
}

impl SqlitePool {
    /// Open (creating if needed) the database at `path` and build the pool.
    ///
    /// One connection is checked out eagerly so a bad path or an unusable
    /// file fails here rather than on first use.
    #[instrument(skip_all, fields(db_path = %path.display(), pool_size = config.max_size))]
    pub fn new(path: &Path, config: SqlitePoolConfig) -> Result<Self> {
        let pragma_config = config.clone();
        let manager = SqliteConnectionManager::file(path)
            .with_init(move |conn| apply_connection_pragmas(conn, &pragma_config));

        let pool = Pool::builder()
            .max_size(config.max_size.max(1))
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|err| {
                warn!(error = %err, "failed to create sqlite pool");
                InfraError::from(err)
            })?;

        drop(pool.get().map_err(InfraError::from)?);
        info!("sqlite pool created");

        Ok(Self { pool, config })
    }

    /// Check out a connection.
    pub fn get(&self) -> Result<SqliteConnection> {
        let started = Instant::now();
        let conn = self.pool.get().map_err(|err| {
            warn!(error = %err, "connection checkout failed");
            InfraError::from(err)
        })?;
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "connection acquired");
        Ok(conn)
    }

    pub fn max_size(&self) -> u32 {
        self.pool.max_size()
    }

    pub fn config(&self) -> &SqlitePoolConfig {
        &self.config
    }
}
