use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Server-assigned message identifier.
pub type MessageId = String;

/// A longitude/latitude pair. Locations are either fully known or absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

/// A message from the shared feed.
///
/// Everything except the two reaction counters is fixed at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Opaque identifier, unique within the feed.
    pub id: MessageId,
    /// Name derived from the author's account email.
    pub display_name: String,
    /// Address the message was posted from.
    pub origin_ip: String,
    /// Where the message was posted, if the author shared a fix.
    pub location: Option<Coordinates>,
    pub posted_at: DateTime<FixedOffset>,
    pub like_count: u32,
    pub dislike_count: u32,
    pub body: String,
}

impl Message {
    /// Bump the counter matching `kind`.
    pub fn record_reaction(&mut self, kind: ReactionKind) {
        match kind {
            ReactionKind::Like => self.like_count = self.like_count.saturating_add(1),
            ReactionKind::Dislike => self.dislike_count = self.dislike_count.saturating_add(1),
        }
    }
}

/// Like or dislike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Path segment used by the feed service.
    pub fn as_str(self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "like" => Ok(ReactionKind::Like),
            "dislike" => Ok(ReactionKind::Dislike),
            other => Err(format!("unknown reaction kind: {other}")),
        }
    }
}

/// The currently loaded page of the feed, in server order.
///
/// Replaced wholesale on every successful refresh; never merged.
#[derive(Debug, Clone, Default)]
pub struct FeedStore {
    messages: Vec<Message>,
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly parsed page.
    ///
    /// Ids must already be unique; the parser rejects pages that repeat one.
    pub fn replace(&mut self, messages: Vec<Message>) {
        debug_assert!(
            {
                let mut seen = HashSet::new();
                messages.iter().all(|m| seen.insert(m.id.as_str()))
            },
            "feed page contains duplicate ids"
        );
        self.messages = messages;
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Look up the live instance by id; positions are never cached.
    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}
