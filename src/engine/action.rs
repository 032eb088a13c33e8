use crate::domain::{FeedError, Message, MessageId, ReactionKind};

#[derive(Debug)]
pub enum Action {
    Feed(FeedAction),
    Async(AsyncAction),
}

/// Requests coming from the shell.
#[derive(Debug)]
pub enum FeedAction {
    /// Reload the most recent `limit` messages.
    Refresh {
        limit: usize,
    },
    /// Reload with room for one more page than is currently loaded.
    LoadMore,
    React {
        message_id: MessageId,
        kind: ReactionKind,
    },
    Post {
        body: String,
    },
}

/// Results delivered back from background network calls.
#[derive(Debug)]
pub enum AsyncAction {
    FeedLoaded {
        limit: usize,
        result: Result<Vec<Message>, FeedError>,
    },
    ReactionSent {
        message_id: MessageId,
        kind: ReactionKind,
        result: Result<(), FeedError>,
    },
    PostSent(Result<(), FeedError>),
}
