//! Engine implementations.

pub mod lobby;
