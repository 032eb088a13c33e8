//! Display-ready rendering of feed messages.

use crate::domain::{Coordinates, Message, distance_between};
use chrono::{DateTime, FixedOffset, TimeZone};
use std::fmt;

/// `Month d, yyyy at h:mm AM/PM`
pub const POSTED_AT_FORMAT: &str = "%B %-d, %Y at %-I:%M %p";

pub fn format_posted_at<Tz>(posted_at: &DateTime<FixedOffset>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    posted_at
        .with_timezone(zone)
        .format(POSTED_AT_FORMAT)
        .to_string()
}

pub fn format_distance(miles: f64) -> String {
    format!("{miles:.1} miles away")
}

/// One rendered feed row.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub id: String,
    pub display_name: String,
    pub posted_at: String,
    /// Hidden when either location is unknown.
    pub distance: Option<String>,
    pub body: String,
    pub like_label: String,
    pub dislike_label: String,
    /// Reaction buttons are disabled once reacted or while a reaction is in flight.
    pub can_react: bool,
}

pub fn present<Tz>(
    message: &Message,
    device_location: Option<Coordinates>,
    can_react: bool,
    zone: &Tz,
) -> MessageView
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    MessageView {
        id: message.id.clone(),
        display_name: message.display_name.clone(),
        posted_at: format_posted_at(&message.posted_at, zone),
        distance: distance_between(message.location, device_location).map(format_distance),
        body: message.body.clone(),
        like_label: format!("Like ({})", message.like_count),
        dislike_label: format!("Dislike ({})", message.dislike_count),
        can_react,
    }
}
