//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `roster` - The fixed ordered list of people and chores
//! - `rotation` - Assignment generation and its settings
//! - `cycle` - Rotation cycle aggregate, completion ledger, scheduling
//! - `violation` - Violation tracking and carry-over handling
//! - `statistics` - Derived per-person compliance figures
//! - `snapshot` - Serializable whole-state document

pub mod cycle;
pub mod foundation;
pub mod roster;
pub mod rotation;
pub mod snapshot;
pub mod statistics;
pub mod violation;
