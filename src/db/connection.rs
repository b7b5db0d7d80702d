use rusqlite::{Connection, OpenFlags};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::ServerError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadWrite,
    /// Never creates the file; used when serving queries.
    ReadOnly,
}

// Thread-local connection slot, tagged with the database it belongs to.
thread_local! {
    static DB_CONN: RefCell<Option<(PathBuf, AccessMode, Connection)>> = RefCell::new(None);
}

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    mode: AccessMode,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: AccessMode::ReadWrite,
        }
    }

    pub fn read_only(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: AccessMode::ReadOnly,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection, ServerError> {
        let conn = match self.mode {
            AccessMode::ReadWrite => Connection::open(&self.path),
            AccessMode::ReadOnly => Connection::open_with_flags(
                &self.path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            ),
        }
        .map_err(|e| {
            ServerError::DbError(format!("Open DB {} failed: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), mode = ?self.mode, "Opened SQLite connection");
        Ok(conn)
    }

    /// Provides a mutable connection to the closure. The connection is opened
    /// on first use in each thread and reused until a different database is
    /// requested from that thread. Calls must not nest.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                let reusable = matches!(
                    slot.as_ref(),
                    Some((path, mode, _)) if *path == self.path && *mode == self.mode
                );
                if !reusable {
                    *slot = None;
                    *slot = Some((self.path.clone(), self.mode, self.open()?));
                }
                match slot.as_mut() {
                    Some((_, _, conn)) => f(conn),
                    None => Err(ServerError::InternalError),
                }
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

/// Create the `listings` and `import_runs` tables if they do not exist yet.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    info!("Database initialized at {}", db.path().display());
    Ok(())
}
