//! Application layer (use-cases, policies).
//!
//! This module orchestrates domain logic and defines app-specific policies
//! without depending on a UI shell or a concrete storage backend.

pub mod feed;
pub mod ledger;
