use super::DbConn;
use crate::application::ledger::StringSetStore;
use anyhow::Result;
use std::collections::BTreeSet;

/// SQLite-backed key to string-set store.
pub struct StringSetRepository {
    conn: DbConn,
}

impl StringSetRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }
}

impl StringSetStore for StringSetRepository {
    fn get_string_set(&self, key: &str) -> Result<Option<BTreeSet<String>>> {
        let conn = self
            .conn
            .lock()
            .expect("StringSetRepository: failed to acquire database lock");
        let mut stmt = conn.prepare("SELECT value FROM string_sets WHERE key = ?1")?;
        let rows = stmt.query_map([key], |row| row.get::<_, String>(0))?;
        let values = rows.collect::<Result<BTreeSet<_>, _>>()?;
        Ok(if values.is_empty() { None } else { Some(values) })
    }

    fn replace_string_set(&self, key: &str, values: &BTreeSet<String>) -> Result<()> {
        let mut conn = self
            .conn
            .lock()
            .expect("StringSetRepository: failed to acquire database lock");
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM string_sets WHERE key = ?1", [key])?;
        {
            let mut insert =
                tx.prepare("INSERT INTO string_sets (key, value) VALUES (?1, ?2)")?;
            for value in values {
                insert.execute((key, value))?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
