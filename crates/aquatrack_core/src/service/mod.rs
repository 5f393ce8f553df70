//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate state mutations, persistence and notifications.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod intake_store;
