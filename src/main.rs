//! ChitChat CLI entry point.
//!
//! A terminal shell over the feed engine: it dispatches one operation, waits
//! for the engine to settle, and prints the outcome.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use chitchat::application::feed::presentation::MessageView;
use chitchat::application::ledger::ReactionLedger;
use chitchat::domain::ReactionKind;
use chitchat::infra::app_config;
use chitchat::infra::db::Database;
use chitchat::{FeedApp, FeedEvent};

#[derive(Parser, Debug)]
#[command(name = "chitchat")]
#[command(version)]
#[command(about = "Read, post to, and react on the ChitChat feed", long_about = None)]
struct Args {
    /// Config file (defaults to $CHITCHAT_CONFIG_PATH or the app data directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pages of messages to load before acting
    #[arg(short, long, global = true, default_value = "1")]
    pages: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the most recent messages
    Feed,

    /// Like a message
    Like {
        /// Message id
        id: String,
    },

    /// Dislike a message
    Dislike {
        /// Message id
        id: String,
    },

    /// Post a new message
    Post {
        /// Message text
        text: String,
    },

    /// List message ids this installation has reacted to
    Reacted,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => app_config::load_config_from(path),
        None => app_config::load_config(),
    };

    let db = Database::open().context("Failed to open ledger database")?;

    if let Commands::Reacted = args.command {
        return list_reacted(&db);
    }

    let mut app = FeedApp::from_config(&config, &db).context("Invalid configuration")?;
    load_pages(&mut app, args.pages.max(1)).await;

    let ok = match args.command {
        Commands::Feed => {
            print_feed(&app);
            report(&mut app)
        }
        Commands::Like { id } => react(&mut app, id, ReactionKind::Like).await,
        Commands::Dislike { id } => react(&mut app, id, ReactionKind::Dislike).await,
        Commands::Post { text } => {
            app.post(text);
            app.settle().await;
            let ok = report(&mut app);
            if ok {
                print_feed(&app);
            }
            ok
        }
        Commands::Reacted => unreachable!("handled before the engine starts"),
    };

    app.shutdown().context("Failed to save reaction ledger")?;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

async fn load_pages(app: &mut FeedApp, pages: usize) {
    app.refresh();
    app.settle().await;
    for _ in 1..pages {
        app.load_more();
        app.settle().await;
    }
}

async fn react(app: &mut FeedApp, id: String, kind: ReactionKind) -> bool {
    app.react(id, kind);
    app.settle().await;
    report(app)
}

/// Print engine events; `false` if any of them is a failure.
fn report(app: &mut FeedApp) -> bool {
    let mut ok = true;
    for event in app.drain_events() {
        match event {
            FeedEvent::Refreshed { count } => log::debug!("Loaded {count} messages"),
            FeedEvent::Reacted { message_id, kind } => println!("Sent {kind} for {message_id}"),
            FeedEvent::Posted => println!("Posted."),
            FeedEvent::RefreshFailed(err)
            | FeedEvent::PostFailed(err)
            | FeedEvent::PersistenceFailed(err) => {
                eprintln!("Error: {err}");
                ok = false;
            }
            FeedEvent::ReactionFailed {
                message_id,
                kind,
                error,
            } => {
                eprintln!("Error: could not {kind} {message_id}: {error}");
                ok = false;
            }
        }
    }
    ok
}

fn print_feed(app: &FeedApp) {
    let views = app.views(&chrono::Local);
    if views.is_empty() {
        println!("No messages.");
        return;
    }
    for view in &views {
        print_view(view);
    }
}

fn print_view(view: &MessageView) {
    println!("{} · {}", view.display_name, view.posted_at);
    if let Some(distance) = &view.distance {
        println!("  {distance}");
    }
    println!("  {}", view.body);
    let marker = if view.can_react { "" } else { " (reacted)" };
    println!(
        "  [{}] {}  {}{}",
        view.id, view.like_label, view.dislike_label, marker
    );
    println!();
}

fn list_reacted(db: &Database) -> Result<()> {
    let ledger = ReactionLedger::load(Arc::new(db.string_set_repo()));
    for id in ledger.ids() {
        println!("{id}");
    }
    Ok(())
}
