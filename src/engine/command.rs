use crate::domain::{MessageId, ReactionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchFeed {
        limit: usize,
    },
    SendReaction {
        message_id: MessageId,
        kind: ReactionKind,
    },
    SendPost {
        body: String,
    },
    SaveLedger,
}
