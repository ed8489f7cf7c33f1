//! Bistro Core Library
//!
//! This crate provides the domain models, error types and configuration
//! shared by every Bistro component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, ContentConfig, ImageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
