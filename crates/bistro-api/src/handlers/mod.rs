//! HTTP request handlers

pub mod business;
pub mod health;
pub mod menu;
