//! Infrastructure layer (adapters/implementations).
//!
//! This module contains IO-heavy integrations (SQLite, HTTP, configuration).

pub mod app_config;
pub mod db;
pub mod location;
pub mod transport;
