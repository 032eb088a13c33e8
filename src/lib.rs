pub mod application;
pub mod domain;
pub mod engine;
pub mod infra;

pub use engine::{FeedApp, FeedEvent};
