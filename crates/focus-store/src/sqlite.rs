//! SQLite-based store implementation

use focus_policy::{BlockingPolicy, PolicyRecord};
use focus_util::{AppId, PolicyId};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::{Assignments, Store, StoreResult};

const POLICIES_KEY: &str = "user_policies";
const ASSIGNMENTS_KEY: &str = "app_assignments";

/// SQLite-based store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            r#"
            -- Whole-collection JSON documents (policies, assignments)
            CREATE TABLE IF NOT EXISTS documents (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            -- Bypass expiries, one row per app
            CREATE TABLE IF NOT EXISTS bypasses (
                app_id TEXT PRIMARY KEY,
                expires_at TEXT NOT NULL
            );
            "#,
        )?;

        debug!("Store schema initialized");
        Ok(())
    }

    fn load_document(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let value: Option<String> = conn
            .query_row("SELECT value FROM documents WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn save_document(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO documents (key, value)
            VALUES (?, ?)
            ON CONFLICT(key)
            DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        Ok(())
    }
}

impl Store for SqliteStore {
    fn load_user_policies(&self) -> StoreResult<Vec<BlockingPolicy>> {
        let json = match self.load_document(POLICIES_KEY)? {
            Some(json) => json,
            None => return Ok(Vec::new()),
        };

        let records: Vec<PolicyRecord> = match serde_json::from_str(&json) {
            Ok(records) => records,
            Err(e) => {
                // Fail open: a corrupt document degrades to "no user
                // policies", never an error.
                warn!(error = %e, "Corrupt policy document, treating as empty");
                return Ok(Vec::new());
            }
        };

        Ok(records
            .into_iter()
            .filter_map(PolicyRecord::into_policy)
            .collect())
    }

    fn save_user_policies(&self, policies: &[BlockingPolicy]) -> StoreResult<()> {
        let records: Vec<PolicyRecord> = policies.iter().map(PolicyRecord::from).collect();
        let json = serde_json::to_string(&records)?;
        self.save_document(POLICIES_KEY, &json)?;

        debug!(count = policies.len(), "User policies saved");
        Ok(())
    }

    fn load_assignments(&self) -> StoreResult<Assignments> {
        let json = match self.load_document(ASSIGNMENTS_KEY)? {
            Some(json) => json,
            None => return Ok(Assignments::new()),
        };

        let raw: BTreeMap<String, Vec<String>> = match serde_json::from_str(&json) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Corrupt assignment document, treating as empty");
                return Ok(Assignments::new());
            }
        };

        Ok(raw
            .into_iter()
            .map(|(app, ids)| {
                (
                    AppId::new(app),
                    ids.into_iter().map(PolicyId::new).collect(),
                )
            })
            .collect())
    }

    fn save_assignments(&self, assignments: &Assignments) -> StoreResult<()> {
        // Sorted keys and ids keep the stored document stable
        let raw: BTreeMap<&str, Vec<&str>> = assignments
            .iter()
            .map(|(app, ids)| {
                let mut ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
                ids.sort_unstable();
                (app.as_str(), ids)
            })
            .collect();

        let json = serde_json::to_string(&raw)?;
        self.save_document(ASSIGNMENTS_KEY, &json)?;

        debug!(count = assignments.len(), "Assignments saved");
        Ok(())
    }

    fn get_bypass_expiry(&self, app: &AppId) -> StoreResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let expiry: Option<String> = conn
            .query_row(
                "SELECT expires_at FROM bypasses WHERE app_id = ?",
                [app.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(expiry)
    }

    fn set_bypass_expiry(&self, app: &AppId, expiry: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO bypasses (app_id, expires_at)
            VALUES (?, ?)
            ON CONFLICT(app_id)
            DO UPDATE SET expires_at = excluded.expires_at
            "#,
            params![app.as_str(), expiry],
        )?;

        debug!(app = %app, expiry = %expiry, "Bypass expiry set");
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                warn!("Store lock poisoned");
                false
            }
        }
    }
}
