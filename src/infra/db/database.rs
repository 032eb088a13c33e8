//! SQLite database setup and connection management for ChitChat
//! Handles database initialization, schema creation, and connection management.

use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const SCHEMA_VERSION: i32 = 1;

/// Database wrapper that manages SQLite connections
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create or open the database at the default location
    pub fn open() -> Result<Self> {
        let path = Self::default_path();
        Self::open_at(path)
    }

    /// Create an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;
        Ok(db)
    }

    /// Create or open the database at a specific path
    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;
        log::debug!("Opened database at {}", path.display());
        Ok(db)
    }

    /// `$CHITCHAT_DB_PATH`, else `db.sqlite` in the app data directory.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("CHITCHAT_DB_PATH") {
            return PathBuf::from(path);
        }
        crate::infra::app_config::app_data_dir().join("db.sqlite")
    }

    fn init(&self) -> Result<()> {
        let conn = self.conn.lock().expect("Database: failed to acquire lock");

        let existing_version: i32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        if existing_version == 0 {
            Self::create_schema(&conn)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        } else if existing_version < SCHEMA_VERSION {
            for version in (existing_version + 1)..=SCHEMA_VERSION {
                Self::run_migration(&conn, version)?;
            }
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        } else if existing_version > SCHEMA_VERSION {
            anyhow::bail!(
                "Database schema version {existing_version} is newer than supported version {SCHEMA_VERSION}"
            );
        }

        Ok(())
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }

    pub fn string_set_repo(&self) -> crate::infra::db::repository::StringSetRepository {
        crate::infra::db::repository::StringSetRepository::new(self.connection())
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS string_sets (
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY(key, value)
            );
            "#,
        )?;
        Ok(())
    }

    fn run_migration(_conn: &Connection, version: i32) -> Result<()> {
        Err(anyhow::anyhow!(
            "Unknown migration version: {}. Add the migration to run_migration() in database.rs",
            version
        ))
    }
}
