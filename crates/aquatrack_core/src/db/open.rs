//! Connection bootstrap utilities for SQLite.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - Every open attempt emits exactly one terminal `db_open` event.

use super::migrations::{apply_migrations, MigrationError};
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub type OpenResult<T> = Result<T, OpenError>;

/// Why a tracker database could not be handed out.
#[derive(Debug)]
pub enum OpenError {
    /// SQLite refused to open or configure the connection.
    Connection {
        mode: &'static str,
        source: rusqlite::Error,
    },
    Migration(MigrationError),
}

impl OpenError {
    /// Stable code used in `db_open` log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "db_open_failed",
            Self::Migration(_) => "db_migration_failed",
        }
    }
}

impl Display for OpenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection { mode, source } => {
                write!(f, "cannot open {mode} tracker database: {source}")
            }
            Self::Migration(err) => write!(f, "tracker schema upgrade failed: {err}"),
        }
    }
}

impl Error for OpenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection { source, .. } => Some(source),
            Self::Migration(err) => Some(err),
        }
    }
}

/// Opens the tracker database file, creating it when missing.
///
/// # Side effects
/// - Applies pending migrations.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> OpenResult<Connection> {
    open_logged("file", || Connection::open(path))
}

/// Opens an ephemeral in-memory tracker database.
pub fn open_db_in_memory() -> OpenResult<Connection> {
    open_logged("memory", Connection::open_in_memory)
}

fn open_logged(
    mode: &'static str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> OpenResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = open()
        .and_then(|conn| conn.busy_timeout(BUSY_TIMEOUT).map(|()| conn))
        .map_err(|source| OpenError::Connection { mode, source })
        .and_then(|mut conn| {
            apply_migrations(&mut conn)
                .map(|()| conn)
                .map_err(OpenError::Migration)
        });

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code={} error={err}",
            started_at.elapsed().as_millis(),
            err.code()
        ),
    }
    result
}
