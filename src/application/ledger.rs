//! Durable record of the messages this installation has reacted to.
//!
//! The ledger lives in memory and is written back through a key-value
//! string-set store. Writes always clear the entry and rewrite the whole set.

use crate::domain::{FeedError, MessageId};
use anyhow::Result;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

/// Key the reacted ids are stored under.
pub const REACTED_MESSAGES_KEY: &str = "REACTED_MESSAGES_KEY";

/// Key-value store holding sets of strings.
pub trait StringSetStore: Send + Sync {
    /// Read the set under `key`; `None` when nothing was ever written.
    fn get_string_set(&self, key: &str) -> Result<Option<BTreeSet<String>>>;

    /// Clear `key`, then write `values` as its complete contents.
    fn replace_string_set(&self, key: &str, values: &BTreeSet<String>) -> Result<()>;
}

/// Process-local store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStringSetStore {
    sets: Mutex<HashMap<String, BTreeSet<String>>>,
}

impl MemoryStringSetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StringSetStore for MemoryStringSetStore {
    fn get_string_set(&self, key: &str) -> Result<Option<BTreeSet<String>>> {
        let sets = self
            .sets
            .lock()
            .expect("MemoryStringSetStore: failed to acquire lock");
        Ok(sets.get(key).cloned())
    }

    fn replace_string_set(&self, key: &str, values: &BTreeSet<String>) -> Result<()> {
        let mut sets = self
            .sets
            .lock()
            .expect("MemoryStringSetStore: failed to acquire lock");
        sets.remove(key);
        sets.insert(key.to_string(), values.clone());
        Ok(())
    }
}

pub struct ReactionLedger {
    reacted: BTreeSet<MessageId>,
    store: Arc<dyn StringSetStore>,
}

impl ReactionLedger {
    /// Load the persisted set. A missing entry or a failed read yields an
    /// empty ledger.
    pub fn load(store: Arc<dyn StringSetStore>) -> Self {
        let reacted = match store.get_string_set(REACTED_MESSAGES_KEY) {
            Ok(Some(ids)) => ids,
            Ok(None) => BTreeSet::new(),
            Err(err) => {
                log::warn!("Failed to load reaction ledger, assuming no prior reactions: {err:#}");
                BTreeSet::new()
            }
        };
        log::debug!("Loaded {} reacted message ids", reacted.len());
        Self { reacted, store }
    }

    pub fn has_reacted(&self, message_id: &str) -> bool {
        self.reacted.contains(message_id)
    }

    /// Record a confirmed reaction. Returns `false` if the id was already known.
    pub fn mark_reacted(&mut self, message_id: &str) -> bool {
        self.reacted.insert(message_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.reacted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reacted.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.reacted.iter().map(String::as_str)
    }

    /// Write the whole set back to the store.
    pub fn save(&self) -> Result<(), FeedError> {
        self.store
            .replace_string_set(REACTED_MESSAGES_KEY, &self.reacted)
            .map_err(|e| FeedError::Persistence(format!("{e:#}")))
    }
}
