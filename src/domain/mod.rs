//! Domain types for ChitChat
//! Defines the feed data model and the pure functions applied to it.

pub mod distance;
pub mod error;
pub mod identity;
pub mod message;

pub use distance::*;
pub use error::*;
pub use identity::resolve;
pub use message::*;
