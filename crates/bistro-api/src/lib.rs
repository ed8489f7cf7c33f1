//! Bistro API Library
//!
//! HTTP handlers, middleware and application setup for the business
//! registration service and the menu proxy.

mod api_doc;
mod handlers;
mod middleware;
mod telemetry;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
