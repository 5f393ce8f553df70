//! SQLite bootstrap for the tracker key-value table.
//!
//! Callers get a `Connection` only after `open_db`/`open_db_in_memory` has
//! set the busy timeout and brought `PRAGMA user_version` up to
//! [`migrations::latest_version`]. Tracker code never touches the schema
//! directly; it goes through `repo::kv_store`.

pub mod migrations;
mod open;

pub use migrations::MigrationError;
pub use open::{open_db, open_db_in_memory, OpenError, OpenResult};
