//! Bistro persistence layer
//!
//! The document store holding business records, backed by Postgres.

pub mod db;

pub use db::{connect, connect_lazy, migrate, BusinessRepository, BusinessStore};
