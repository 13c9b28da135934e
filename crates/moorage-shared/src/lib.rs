//! # Moorage Shared
//!
//! Shared utilities, types, configuration, and telemetry for the moorage
//! reservation platform.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use error::AppError;
pub use types::*;
