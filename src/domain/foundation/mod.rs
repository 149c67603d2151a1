//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the chore rotation domain.

mod cycle_status;
mod errors;
mod ids;
mod timestamp;

pub use cycle_status::CycleStatus;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ChoreId, CycleId, PersonId, ViolationId};
pub use timestamp::Timestamp;
