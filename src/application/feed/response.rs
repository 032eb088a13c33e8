//! Parsing of feed service replies.
//!
//! A feed page is accepted all-or-nothing: one bad record rejects the page.
//! Coordinates are the exception and degrade to "unknown" per record.

use crate::domain::{Coordinates, FeedError, Message, resolve};
use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Literal the service uses to acknowledge reactions and posts.
pub const SUCCESS: &str = "Success";

#[derive(Debug, Deserialize)]
struct FeedPage {
    messages: Vec<RawMessage>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(rename = "_id")]
    id: String,
    client: String,
    ip: String,
    loc: Vec<Value>,
    date: String,
    likes: u32,
    dislikes: u32,
    message: String,
}

#[derive(Debug, Deserialize)]
struct StatusReply {
    message: Value,
}

/// Parse a fetch reply into messages in server order.
///
/// `limit` is the page size that was requested; a reply holding more records
/// than asked for is rejected.
pub fn parse_feed(body: &str, limit: usize) -> Result<Vec<Message>, FeedError> {
    let page: FeedPage = serde_json::from_str(body)?;

    if page.messages.len() > limit {
        return Err(FeedError::MalformedResponse(format!(
            "asked for {limit} messages, received {}",
            page.messages.len()
        )));
    }

    let mut seen = HashSet::with_capacity(page.messages.len());
    let mut messages = Vec::with_capacity(page.messages.len());
    for raw in page.messages {
        if !seen.insert(raw.id.clone()) {
            return Err(FeedError::MalformedResponse(format!(
                "duplicate message id {}",
                raw.id
            )));
        }
        messages.push(parse_record(raw)?);
    }
    Ok(messages)
}

fn parse_record(raw: RawMessage) -> Result<Message, FeedError> {
    let display_name = resolve(&raw.client)?;
    let posted_at = DateTime::parse_from_rfc2822(raw.date.trim()).map_err(|e| {
        FeedError::MalformedResponse(format!("message {}: bad date {:?}: {e}", raw.id, raw.date))
    })?;
    let location = parse_location(&raw.id, &raw.loc)?;

    Ok(Message {
        id: raw.id,
        display_name,
        origin_ip: raw.ip,
        location,
        posted_at,
        like_count: raw.likes,
        dislike_count: raw.dislikes,
        body: raw.message,
    })
}

/// `loc` is `[lon, lat]`; a coordinate that is null or not numeric makes the
/// whole location unknown.
fn parse_location(id: &str, loc: &[Value]) -> Result<Option<Coordinates>, FeedError> {
    let [lon, lat, ..] = loc else {
        return Err(FeedError::MalformedResponse(format!(
            "message {id}: loc has {} entries, expected 2",
            loc.len()
        )));
    };
    Ok(coordinate(lon)
        .zip(coordinate(lat))
        .map(|(longitude, latitude)| Coordinates {
            longitude,
            latitude,
        }))
}

fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Check a reaction or post acknowledgement.
pub fn parse_status(body: &str, operation: &str) -> Result<(), FeedError> {
    let reply: StatusReply = serde_json::from_str(body)?;
    match reply.message {
        Value::String(ref s) if s == SUCCESS => Ok(()),
        Value::String(s) => Err(FeedError::not_success(operation, &s)),
        other => Err(FeedError::MalformedResponse(format!(
            "{operation} reply has non-string message: {other}"
        ))),
    }
}
