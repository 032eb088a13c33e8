//! Feed synchronization engine.
//!
//! Reducer-style state updates plus side-effect commands. The owner of a
//! `FeedApp` is the single foreground context: it dispatches actions, and
//! drains background results with [`FeedApp::poll_action_messages`] or
//! [`FeedApp::settle`]. Background tasks only ever send actions back.

mod action;
mod command;
mod reducer;
mod runtime;
mod state;


pub use action::{Action, AsyncAction, FeedAction};
pub use command::Command;
pub use state::{FeedEvent, FeedState};

use crate::application::feed::FeedEndpoint;
use crate::application::feed::presentation::{MessageView, present};
use crate::application::ledger::{ReactionLedger, StringSetStore};
use crate::domain::{Coordinates, FeedError, Message, ReactionKind};
use crate::infra::app_config::AppConfig;
use crate::infra::db::Database;
use crate::infra::location::{FixedLocation, LocationProvider};
use crate::infra::transport::{HttpTransport, Transport};
use chrono::TimeZone;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub struct FeedApp {
    state: FeedState,
    endpoint: FeedEndpoint,
    transport: Arc<dyn Transport>,
    device_location: Option<Coordinates>,
    action_tx: mpsc::Sender<Action>,
    action_rx: mpsc::Receiver<Action>,
    torn_down: bool,
}

impl FeedApp {
    /// Wire the engine to its collaborators. The ledger is loaded and the
    /// device location read once, here.
    pub fn new(
        endpoint: FeedEndpoint,
        transport: Arc<dyn Transport>,
        ledger_store: Arc<dyn StringSetStore>,
        location: &dyn LocationProvider,
        page_size: usize,
    ) -> Self {
        let ledger = ReactionLedger::load(ledger_store);
        let (action_tx, action_rx) = mpsc::channel(32);
        Self {
            state: FeedState::new(ledger, page_size),
            endpoint,
            transport,
            device_location: location.last_known_location(),
            action_tx,
            action_rx,
            torn_down: false,
        }
    }

    /// Build an engine talking HTTP to the configured endpoint, with the
    /// ledger kept in `db`.
    pub fn from_config(config: &AppConfig, db: &Database) -> Result<Self, FeedError> {
        if config.page_size == 0 {
            return Err(FeedError::Configuration(
                "page_size must be at least 1".to_string(),
            ));
        }
        let endpoint = FeedEndpoint::new(&config.endpoint, &config.api_key, &config.client)?;
        let transport = HttpTransport::new(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::new(
            endpoint,
            Arc::new(transport),
            Arc::new(db.string_set_repo()),
            &FixedLocation(config.device_location),
            config.page_size,
        ))
    }

    pub fn dispatch(&mut self, action: Action) {
        if self.torn_down {
            log::warn!("Dropping {action:?} after shutdown");
            return;
        }
        let commands = reducer::reduce(&mut self.state, action);
        for command in commands {
            runtime::run(self, command);
        }
    }

    /// Load the first page.
    pub fn refresh(&mut self) {
        let limit = self.state.page_size;
        self.refresh_with_limit(limit);
    }

    pub fn refresh_with_limit(&mut self, limit: usize) {
        self.dispatch(Action::Feed(FeedAction::Refresh { limit }));
    }

    pub fn load_more(&mut self) {
        self.dispatch(Action::Feed(FeedAction::LoadMore));
    }

    pub fn react(&mut self, message_id: impl Into<String>, kind: ReactionKind) {
        self.dispatch(Action::Feed(FeedAction::React {
            message_id: message_id.into(),
            kind,
        }));
    }

    pub fn post(&mut self, body: impl Into<String>) {
        self.dispatch(Action::Feed(FeedAction::Post { body: body.into() }));
    }

    /// Apply every background result that has already arrived.
    pub fn poll_action_messages(&mut self) -> bool {
        let mut any = false;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            any = true;
        }
        any
    }

    /// Wait until every in-flight call, including follow-ups such as the
    /// refresh after a post, has been applied.
    pub async fn settle(&mut self) {
        while !self.torn_down && self.state.in_flight > 0 {
            match self.action_rx.recv().await {
                Some(action) => self.dispatch(action),
                None => break,
            }
        }
    }

    /// Persist the ledger and stop applying results.
    pub fn shutdown(&mut self) -> Result<(), FeedError> {
        if self.torn_down {
            return Ok(());
        }
        self.torn_down = true;
        if self.state.in_flight > 0 {
            log::warn!(
                "Shutting down with {} call(s) in flight; their results will be ignored",
                self.state.in_flight
            );
        }
        self.state.ledger.save()
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn drain_events(&mut self) -> Vec<FeedEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn messages(&self) -> &[Message] {
        self.state.feed.messages()
    }

    pub fn can_react(&self, message_id: &str) -> bool {
        self.state.can_react(message_id)
    }

    pub fn has_reacted(&self, message_id: &str) -> bool {
        self.state.ledger.has_reacted(message_id)
    }

    pub fn device_location(&self) -> Option<Coordinates> {
        self.device_location
    }

    /// Rendered rows for the loaded page.
    pub fn views<Tz>(&self, zone: &Tz) -> Vec<MessageView>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.state
            .feed
            .iter()
            .map(|m| present(m, self.device_location, self.can_react(&m.id), zone))
            .collect()
    }
}
