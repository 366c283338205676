//! Draft Persistence
//!
//! Mirrors the in-progress answer map to a durable string-keyed medium so a
//! reload does not lose progress. Hydration and persistence are both
//! infallible from the caller's perspective: corruption hydrates as empty,
//! write failures are logged and swallowed.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

use crate::models::question::AnswerMap;
use crate::storage::database::Database;
use crate::utils::error::AppResult;

/// A durable string-keyed get/set medium for draft storage.
pub trait DraftMedium: Send + Sync {
    /// Read the value at `key`, if present
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    /// Write `value` at `key`, overwriting any previous value
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

/// Draft store: serializes answer maps onto a [`DraftMedium`].
pub struct DraftStore {
    medium: Box<dyn DraftMedium>,
}

impl DraftStore {
    /// Create a draft store over the given medium
    pub fn new(medium: Box<dyn DraftMedium>) -> Self {
        Self { medium }
    }

    /// Load the draft answer map for a session key.
    ///
    /// A missing key or unparseable content yields an empty map; both are
    /// logged, neither is surfaced to the caller.
    pub fn hydrate(&self, session_key: &str) -> AnswerMap {
        match self.medium.get(session_key) {
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(answers) => answers,
                Err(e) => {
                    warn!("discarding corrupt draft for '{}': {}", session_key, e);
                    AnswerMap::new()
                }
            },
            Ok(None) => AnswerMap::new(),
            Err(e) => {
                warn!("failed to read draft for '{}': {}", session_key, e);
                AnswerMap::new()
            }
        }
    }

    /// Persist the full answer map under a session key.
    ///
    /// Fire-and-forget: always writes the entire map so the durable state
    /// converges to the last write regardless of completion order. Failures
    /// are logged and never block navigation.
    pub fn persist(&self, session_key: &str, answers: &AnswerMap) {
        let text = match serde_json::to_string(answers) {
            Ok(text) => text,
            Err(e) => {
                warn!("failed to serialize draft for '{}': {}", session_key, e);
                return;
            }
        };

        if let Err(e) = self.medium.set(session_key, &text) {
            warn!("failed to persist draft for '{}': {}", session_key, e);
        }
    }
}

impl std::fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftStore").finish()
    }
}

/// In-memory draft medium for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryDraftMedium {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryDraftMedium {
    /// Create an empty in-memory medium
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftMedium for MemoryDraftMedium {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// SQLite-backed draft medium over the `drafts` key-value table
pub struct SqliteDraftMedium {
    db: Database,
}

impl SqliteDraftMedium {
    /// Create a medium over the given database
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl DraftMedium for SqliteDraftMedium {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.db.get_draft(key)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.db.set_draft(key, value)
    }
}
