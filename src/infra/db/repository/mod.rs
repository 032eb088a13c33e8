//! Repository implementations for data access in ChitChat.

mod string_set;

pub use string_set::StringSetRepository;

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub(super) type DbConn = Arc<Mutex<Connection>>;
