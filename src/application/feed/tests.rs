use crate::application::feed::presentation::*;
use crate::application::feed::response::*;
use crate::domain::*;
use chrono::Utc;

const ONE_MESSAGE: &str = r#"{"messages":[{"_id":"1","client":"a.b@x.com","ip":"1.1.1.1","loc":["-73.1","44.5"],"date":"Mon, 01 Jan 2024 10:00:00 GMT","likes":0,"dislikes":0,"message":"hi"}]}"#;

fn record(id: &str, client: &str, loc: &str) -> String {
    format!(
        r#"{{"_id":"{id}","client":"{client}","ip":"10.0.0.1","loc":{loc},"date":"Tue, 02 Jan 2024 15:04:05 GMT","likes":3,"dislikes":1,"message":"body {id}"}}"#
    )
}

fn page(records: &[String]) -> String {
    format!(r#"{{"messages":[{}]}}"#, records.join(","))
}

#[test]
fn test_parse_single_message() {
    let messages = parse_feed(ONE_MESSAGE, 20).unwrap();
    assert_eq!(messages.len(), 1);

    let msg = &messages[0];
    assert_eq!(msg.id, "1");
    assert_eq!(msg.display_name, "A B");
    assert_eq!(msg.origin_ip, "1.1.1.1");
    assert_eq!(
        msg.location,
        Some(Coordinates {
            longitude: -73.1,
            latitude: 44.5
        })
    );
    assert_eq!(msg.like_count, 0);
    assert_eq!(msg.dislike_count, 0);
    assert_eq!(msg.body, "hi");
    assert_eq!(msg.posted_at.to_rfc3339(), "2024-01-01T10:00:00+00:00");
}

#[test]
fn test_parse_keeps_server_order() {
    let body = page(&[
        record("c", "dkopec@champlain.edu", r#"["1","2"]"#),
        record("a", "x.y@champlain.edu", r#"["1","2"]"#),
        record("b", "q.r@champlain.edu", r#"["1","2"]"#),
    ]);
    let ids: Vec<_> = parse_feed(&body, 20)
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn test_null_or_garbage_coordinates_are_absent() {
    let body = page(&[
        record("1", "a.b@x.com", "[null,null]"),
        record("2", "a.b@x.com", r#"["abc","44.5"]"#),
        record("3", "a.b@x.com", r#"["-73.1",null]"#),
        record("4", "a.b@x.com", "[-73.1,44.5]"),
    ]);
    let messages = parse_feed(&body, 20).unwrap();
    assert_eq!(messages[0].location, None);
    assert_eq!(messages[1].location, None);
    assert_eq!(messages[2].location, None);
    assert!(messages[3].location.is_some());
}

#[test]
fn test_short_loc_array_rejects_page() {
    let body = page(&[record("1", "a.b@x.com", r#"["-73.1"]"#)]);
    assert!(matches!(
        parse_feed(&body, 20),
        Err(FeedError::MalformedResponse(_))
    ));
}

#[test]
fn test_missing_messages_field_is_malformed() {
    assert!(matches!(
        parse_feed(r#"{"message":"Success"}"#, 20),
        Err(FeedError::MalformedResponse(_))
    ));
    assert!(matches!(
        parse_feed("Error: Could not complete request.", 20),
        Err(FeedError::MalformedResponse(_))
    ));
}

#[test]
fn test_missing_field_rejects_whole_page() {
    let broken = r#"{"_id":"2","client":"a.b@x.com","ip":"1.1.1.1","loc":[null,null],"date":"Mon, 01 Jan 2024 10:00:00 GMT","likes":0,"message":"no dislikes"}"#;
    let body = page(&[record("1", "a.b@x.com", "[null,null]"), broken.to_string()]);
    assert!(matches!(
        parse_feed(&body, 20),
        Err(FeedError::MalformedResponse(_))
    ));
}

#[test]
fn test_bad_date_rejects_page() {
    let body = ONE_MESSAGE.replace("Mon, 01 Jan 2024 10:00:00 GMT", "yesterday");
    assert!(matches!(
        parse_feed(&body, 20),
        Err(FeedError::MalformedResponse(_))
    ));
}

#[test]
fn test_invalid_identity_rejects_page() {
    let body = page(&[record("1", "no-at-sign", "[null,null]")]);
    assert!(matches!(
        parse_feed(&body, 20),
        Err(FeedError::InvalidIdentity(_))
    ));
}

#[test]
fn test_duplicate_ids_reject_page() {
    let body = page(&[
        record("1", "a.b@x.com", "[null,null]"),
        record("1", "a.b@x.com", "[null,null]"),
    ]);
    assert!(matches!(
        parse_feed(&body, 20),
        Err(FeedError::MalformedResponse(_))
    ));
}

#[test]
fn test_oversized_page_is_rejected() {
    let body = page(&[
        record("1", "a.b@x.com", "[null,null]"),
        record("2", "a.b@x.com", "[null,null]"),
    ]);
    assert!(parse_feed(&body, 2).is_ok());
    assert!(matches!(
        parse_feed(&body, 1),
        Err(FeedError::MalformedResponse(_))
    ));
}

#[test]
fn test_parse_status() {
    assert_eq!(parse_status(r#"{"message":"Success"}"#, "like"), Ok(()));
    assert!(matches!(
        parse_status(r#"{"message":"Already liked"}"#, "like"),
        Err(FeedError::Rejected(_))
    ));
    assert!(matches!(
        parse_status(r#"{"message":null}"#, "post"),
        Err(FeedError::MalformedResponse(_))
    ));
    assert!(matches!(
        parse_status("<html>502</html>", "post"),
        Err(FeedError::MalformedResponse(_))
    ));
}

#[test]
fn test_format_posted_at() {
    let messages = parse_feed(ONE_MESSAGE, 20).unwrap();
    assert_eq!(
        format_posted_at(&messages[0].posted_at, &Utc),
        "January 1, 2024 at 10:00 AM"
    );

    let afternoon = chrono::DateTime::parse_from_rfc2822("Tue, 02 Jan 2024 15:04:05 GMT").unwrap();
    assert_eq!(
        format_posted_at(&afternoon, &Utc),
        "January 2, 2024 at 3:04 PM"
    );
}

#[test]
fn test_present_row() {
    let messages = parse_feed(ONE_MESSAGE, 20).unwrap();
    let device = Coordinates {
        longitude: -73.1,
        latitude: 45.5,
    };

    let view = present(&messages[0], Some(device), true, &Utc);
    assert_eq!(view.display_name, "A B");
    assert_eq!(view.distance.as_deref(), Some("69.0 miles away"));
    assert_eq!(view.like_label, "Like (0)");
    assert!(view.can_react);

    let hidden = present(&messages[0], None, false, &Utc);
    assert_eq!(hidden.distance, None);
    assert!(!hidden.can_react);
}
