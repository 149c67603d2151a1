//! Cycle module - the rotation cycle aggregate and its scheduling.

mod aggregate;
mod ledger;
pub(crate) mod schedule;

pub use aggregate::Cycle;
pub use ledger::{CompletionEntry, CompletionLedger};
pub use schedule::{next_cycle_window, CycleWindow};
