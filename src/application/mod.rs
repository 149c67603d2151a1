//! Application layer - the operation surface over the domain.

mod service;

pub use service::RotationService;
