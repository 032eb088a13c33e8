use crate::application::ledger::ReactionLedger;
use crate::domain::{FeedError, FeedStore, MessageId, ReactionKind};
use std::collections::HashSet;

/// Outcome notices for the shell, drained with `FeedApp::drain_events`.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Refreshed { count: usize },
    RefreshFailed(FeedError),
    Reacted {
        message_id: MessageId,
        kind: ReactionKind,
    },
    ReactionFailed {
        message_id: MessageId,
        kind: ReactionKind,
        error: FeedError,
    },
    /// The composer may be cleared.
    Posted,
    PostFailed(FeedError),
    PersistenceFailed(FeedError),
}

/// Engine state. Only the reducer and runtime mutate it.
pub struct FeedState {
    pub(super) feed: FeedStore,
    pub(super) ledger: ReactionLedger,
    /// Messages added per page.
    pub(super) page_size: usize,
    /// Limit used by the last successful refresh.
    pub(super) page_limit: usize,
    /// Message ids with a reaction call in flight.
    pub(super) pending_reactions: HashSet<MessageId>,
    pub(super) refreshes_in_flight: usize,
    pub(super) posts_in_flight: usize,
    /// Network calls whose results have not been applied yet.
    pub(super) in_flight: usize,
    pub(super) events: Vec<FeedEvent>,
}

impl FeedState {
    pub(super) fn new(ledger: ReactionLedger, page_size: usize) -> Self {
        Self {
            feed: FeedStore::new(),
            ledger,
            page_size,
            page_limit: page_size,
            pending_reactions: HashSet::new(),
            refreshes_in_flight: 0,
            posts_in_flight: 0,
            in_flight: 0,
            events: Vec::new(),
        }
    }

    /// Whether the like/dislike controls for `message_id` should be enabled.
    pub fn can_react(&self, message_id: &str) -> bool {
        !self.ledger.has_reacted(message_id) && !self.pending_reactions.contains(message_id)
    }

    pub fn feed(&self) -> &FeedStore {
        &self.feed
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Limit used by the last successful refresh.
    pub fn page_limit(&self) -> usize {
        self.page_limit
    }

    /// Network calls whose results have not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshes_in_flight > 0
    }

    pub fn is_posting(&self) -> bool {
        self.posts_in_flight > 0
    }
}
