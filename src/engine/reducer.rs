//! State transitions. Runs only on the foreground context that owns the
//! `FeedApp`; background tasks never touch `FeedState`.

use super::action::{Action, AsyncAction, FeedAction};
use super::command::Command;
use super::state::{FeedEvent, FeedState};
use crate::domain::{FeedError, Message, MessageId, ReactionKind};

pub fn reduce(state: &mut FeedState, action: Action) -> Vec<Command> {
    match action {
        Action::Feed(action) => reduce_feed(state, action),
        Action::Async(action) => reduce_async(state, action),
    }
}

fn reduce_feed(state: &mut FeedState, action: FeedAction) -> Vec<Command> {
    match action {
        FeedAction::Refresh { limit } => vec![Command::FetchFeed { limit }],
        FeedAction::LoadMore => vec![Command::FetchFeed {
            limit: state.feed.len() + state.page_size,
        }],
        FeedAction::React { message_id, kind } => {
            if let Err(error) = check_can_react(state, &message_id) {
                log::debug!("Rejected {kind} on {message_id} locally: {error}");
                state.events.push(FeedEvent::ReactionFailed {
                    message_id,
                    kind,
                    error,
                });
                return Vec::new();
            }
            state.pending_reactions.insert(message_id.clone());
            vec![Command::SendReaction { message_id, kind }]
        }
        FeedAction::Post { body } => vec![Command::SendPost { body }],
    }
}

fn check_can_react(state: &FeedState, message_id: &str) -> Result<(), FeedError> {
    if state.ledger.has_reacted(message_id) {
        return Err(FeedError::already_reacted(message_id));
    }
    if state.pending_reactions.contains(message_id) {
        return Err(FeedError::reaction_pending(message_id));
    }
    if !state.feed.contains(message_id) {
        return Err(FeedError::unknown_message(message_id));
    }
    Ok(())
}

fn reduce_async(state: &mut FeedState, action: AsyncAction) -> Vec<Command> {
    state.in_flight = state.in_flight.saturating_sub(1);
    match action {
        AsyncAction::FeedLoaded { limit, result } => {
            state.refreshes_in_flight = state.refreshes_in_flight.saturating_sub(1);
            apply_feed(state, limit, result);
            Vec::new()
        }
        AsyncAction::ReactionSent {
            message_id,
            kind,
            result,
        } => apply_reaction(state, message_id, kind, result),
        AsyncAction::PostSent(result) => {
            state.posts_in_flight = state.posts_in_flight.saturating_sub(1);
            match result {
                Ok(()) => {
                    log::info!("Message posted, refreshing {} messages", state.page_limit);
                    state.events.push(FeedEvent::Posted);
                    vec![Command::FetchFeed {
                        limit: state.page_limit,
                    }]
                }
                Err(error) => {
                    log::warn!("Post failed: {error}");
                    state.events.push(FeedEvent::PostFailed(error));
                    Vec::new()
                }
            }
        }
    }
}

fn apply_feed(state: &mut FeedState, limit: usize, result: Result<Vec<Message>, FeedError>) {
    match result {
        Ok(messages) => {
            let count = messages.len();
            state.feed.replace(messages);
            state.page_limit = limit;
            log::info!("Loaded {count} messages (limit {limit})");
            state.events.push(FeedEvent::Refreshed { count });
        }
        Err(error) => {
            log::warn!("Refresh failed, keeping {} messages: {error}", state.feed.len());
            state.events.push(FeedEvent::RefreshFailed(error));
        }
    }
}

fn apply_reaction(
    state: &mut FeedState,
    message_id: MessageId,
    kind: ReactionKind,
    result: Result<(), FeedError>,
) -> Vec<Command> {
    state.pending_reactions.remove(&message_id);

    if let Err(error) = result {
        log::warn!("{kind} on {message_id} failed: {error}");
        state.events.push(FeedEvent::ReactionFailed {
            message_id,
            kind,
            error,
        });
        return Vec::new();
    }

    if !state.ledger.mark_reacted(&message_id) {
        log::warn!("Ignoring repeated {kind} confirmation for {message_id}");
        return Vec::new();
    }

    // Resolve by id at apply time: a refresh may have replaced the instance.
    match state.feed.get_mut(&message_id) {
        Some(message) => message.record_reaction(kind),
        None => log::debug!("{message_id} left the feed before its {kind} was confirmed"),
    }

    log::info!("Recorded {kind} on {message_id}");
    state.events.push(FeedEvent::Reacted { message_id, kind });
    vec![Command::SaveLedger]
}
