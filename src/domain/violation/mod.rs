//! Violation module - rule violation tracking and carry-over handling.

mod log;

pub use log::{CarryOverOutcome, Violation, ViolationLog};
