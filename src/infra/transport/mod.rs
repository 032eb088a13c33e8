//! Network access to the feed service.
//!
//! The engine only sees the [`Transport`] trait: hand it a request, get the
//! raw reply text back or a transport-level failure.

mod http;

pub use http::HttpTransport;

use crate::application::feed::FeedRequest;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("could not read response body: {0}")]
    Body(String),
}

impl From<TransportError> for crate::domain::FeedError {
    fn from(err: TransportError) -> Self {
        crate::domain::FeedError::Transport(err.to_string())
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &FeedRequest) -> Result<String, TransportError>;
}
