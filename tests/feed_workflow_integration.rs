//! Integration tests for the feed engine
//! These tests drive `FeedApp` through its public API with a scripted transport
//! and a SQLite-backed reaction ledger.

use async_trait::async_trait;
use chitchat::application::feed::{FeedEndpoint, FeedRequest, Method};
use chitchat::domain::{FeedError, ReactionKind};
use chitchat::infra::db::Database;
use chitchat::infra::location::FixedLocation;
use chitchat::infra::transport::{Transport, TransportError};
use chitchat::{FeedApp, FeedEvent};
use std::sync::{Arc, Mutex};

const FEED: &str = r#"{"messages":[{"_id":"1","client":"a.b@x.com","ip":"1.1.1.1","loc":["-73.1","44.5"],"date":"Mon, 01 Jan 2024 10:00:00 GMT","likes":0,"dislikes":0,"message":"hi"}]}"#;

/// Answers like a well-behaved feed service and counts the calls it sees.
#[derive(Default)]
struct ServiceDouble {
    calls: Mutex<Vec<(Method, String)>>,
}

impl ServiceDouble {
    fn calls(&self) -> Vec<(Method, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ServiceDouble {
    async fn send(&self, request: &FeedRequest) -> Result<String, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.method, request.url.path().to_string()));
        if request.method == Method::Post || request.url.path() != "/api" {
            Ok(r#"{"message":"Success"}"#.to_string())
        } else {
            Ok(FEED.to_string())
        }
    }
}

fn open_app(db: &Database, service: Arc<ServiceDouble>) -> FeedApp {
    let endpoint = FeedEndpoint::new("https://chat.example.edu/api", "key", "me@x.com").unwrap();
    FeedApp::new(
        endpoint,
        service,
        Arc::new(db.string_set_repo()),
        &FixedLocation(None),
        20,
    )
}

#[tokio::test]
async fn test_refresh_react_and_restart() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("db.sqlite");
    let service = Arc::new(ServiceDouble::default());

    {
        let db = Database::open_at(db_path.clone())?;
        let mut app = open_app(&db, service.clone());
        app.refresh();
        app.settle().await;

        let message = &app.messages()[0];
        assert_eq!(message.display_name, "A B");
        assert_eq!(message.like_count, 0);

        app.react("1", ReactionKind::Like);
        app.settle().await;
        assert_eq!(app.messages()[0].like_count, 1);
        assert!(app.has_reacted("1"));
        app.shutdown()?;
    }

    // A new process sees the same ledger and refuses to react again.
    let db = Database::open_at(db_path)?;
    let mut app = open_app(&db, service.clone());
    app.refresh();
    app.settle().await;
    app.drain_events();
    assert!(!app.can_react("1"));

    app.react("1", ReactionKind::Dislike);
    app.settle().await;
    assert!(matches!(
        app.drain_events().as_slice(),
        [FeedEvent::ReactionFailed {
            error: FeedError::PreconditionViolation(_),
            ..
        }]
    ));

    let reactions = service
        .calls()
        .iter()
        .filter(|(_, path)| path != "/api")
        .count();
    assert_eq!(reactions, 1);
    Ok(())
}

#[tokio::test]
async fn test_post_then_feed_is_reloaded() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let service = Arc::new(ServiceDouble::default());
    let mut app = open_app(&db, service.clone());

    app.post("first!");
    app.settle().await;

    assert_eq!(
        app.drain_events(),
        vec![FeedEvent::Posted, FeedEvent::Refreshed { count: 1 }]
    );
    assert_eq!(
        service.calls(),
        vec![
            (Method::Post, "/api".to_string()),
            (Method::Get, "/api".to_string())
        ]
    );
    Ok(())
}
