//! Side effects for reducer commands.
//!
//! Network commands spawn a task that talks to the transport, parses the
//! reply, and sends the outcome back as an `AsyncAction`. Every spawned call
//! reports back exactly once, even when the transport panics.

use super::FeedApp;
use super::action::{Action, AsyncAction};
use super::command::Command;
use super::state::FeedEvent;
use crate::application::feed::response::{parse_feed, parse_status};
use crate::domain::{FeedError, MessageId, ReactionKind};
use std::future::Future;

pub fn run(app: &mut FeedApp, command: Command) {
    match command {
        Command::FetchFeed { limit } => fetch_feed(app, limit),
        Command::SendReaction { message_id, kind } => send_reaction(app, message_id, kind),
        Command::SendPost { body } => send_post(app, body),
        Command::SaveLedger => save_ledger(app),
    }
}

fn fetch_feed(app: &mut FeedApp, limit: usize) {
    let request = app.endpoint.fetch(limit);
    let transport = app.transport.clone();
    let action_tx = app.action_tx.clone();
    app.state.in_flight += 1;
    app.state.refreshes_in_flight += 1;

    log::debug!("Fetching {limit} messages");
    tokio::spawn(async move {
        let result = guarded(async move {
            match transport.send(&request).await {
                Ok(body) => parse_feed(&body, limit),
                Err(err) => Err(err.into()),
            }
        })
        .await;
        let _ = action_tx
            .send(Action::Async(AsyncAction::FeedLoaded { limit, result }))
            .await;
    });
}

fn send_reaction(app: &mut FeedApp, message_id: MessageId, kind: ReactionKind) {
    app.state.in_flight += 1;

    let request = match app.endpoint.react(&message_id, kind) {
        Ok(request) => request,
        Err(err) => {
            app.dispatch(Action::Async(AsyncAction::ReactionSent {
                message_id,
                kind,
                result: Err(err),
            }));
            return;
        }
    };
    let transport = app.transport.clone();
    let action_tx = app.action_tx.clone();

    log::debug!("Sending {kind} for {message_id}");
    tokio::spawn(async move {
        let result = guarded(async move {
            match transport.send(&request).await {
                Ok(body) => parse_status(&body, kind.as_str()),
                Err(err) => Err(FeedError::from(err)),
            }
        })
        .await;
        let _ = action_tx
            .send(Action::Async(AsyncAction::ReactionSent {
                message_id,
                kind,
                result,
            }))
            .await;
    });
}

fn send_post(app: &mut FeedApp, body: String) {
    let request = app.endpoint.post(&body, app.device_location);
    let transport = app.transport.clone();
    let action_tx = app.action_tx.clone();
    app.state.in_flight += 1;
    app.state.posts_in_flight += 1;

    log::debug!("Posting a {} byte message", body.len());
    tokio::spawn(async move {
        let result = guarded(async move {
            match transport.send(&request).await {
                Ok(reply) => parse_status(&reply, "post"),
                Err(err) => Err(err.into()),
            }
        })
        .await;
        let _ = action_tx
            .send(Action::Async(AsyncAction::PostSent(result)))
            .await;
    });
}

/// Run one network call on its own task so a panic or abort still produces a
/// result for the reducer.
async fn guarded<T, F>(call: F) -> Result<T, FeedError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, FeedError>> + Send + 'static,
{
    match tokio::spawn(call).await {
        Ok(result) => result,
        Err(err) => {
            log::error!("Network task failed: {err}");
            Err(FeedError::Transport(format!("request task failed: {err}")))
        }
    }
}

fn save_ledger(app: &mut FeedApp) {
    if let Err(err) = app.state.ledger.save() {
        log::error!("Failed to persist reaction ledger: {err}");
        app.state.events.push(FeedEvent::PersistenceFailed(err));
    }
}
