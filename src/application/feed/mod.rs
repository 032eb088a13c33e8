//! Feed use-cases: request building, reply parsing, and presentation.

pub mod presentation;
pub mod request;
pub mod response;

pub use request::{FeedEndpoint, FeedRequest, Method};

/// Messages added per "load more".
pub const PAGE_SIZE: usize = 20;

#[cfg(test)]
mod tests;
