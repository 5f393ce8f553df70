//! Flutter-facing FFI surface for AquaTrack core.

pub mod api;
