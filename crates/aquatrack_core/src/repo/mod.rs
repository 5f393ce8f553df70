//! Persistence ports and implementations for tracker state.
//!
//! # Responsibility
//! - Define the key-value contract and the tracker load/save contract.
//! - Keep storage encoding details out of the intake store.
//!
//! # Invariants
//! - Write failures surface as `RepoError`; read failures degrade to defaults.

pub mod kv_store;
pub mod tracker_repo;
