//! Chore Rota - Household Chore Rotation
//!
//! This crate assigns cleaning chores to a fixed household roster on a
//! recurring schedule, tracks completion and rule violations, and exports
//! the whole state as a JSON snapshot.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
