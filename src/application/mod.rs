//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic with the loaded settings.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
