//! SQLite Database
//!
//! Embedded database for persistent storage using rusqlite with r2d2
//! connection pooling. Holds the `plans` table (JSON-capable columns stored
//! as TEXT; the normalizer owns all shape decisions on read) and the
//! `drafts` key-value table backing in-progress questionnaire sessions.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};

use crate::models::plan::{RawPlanRecord, RawTemporal};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::database_path;

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database service for managing SQLite operations
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create a database from an existing connection pool
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create an in-memory database for testing.
    ///
    /// Uses an in-memory SQLite database with the same schema as the
    /// production database.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Create a new database instance with connection pooling
    pub fn new() -> AppResult<Self> {
        let db_path = database_path()?;

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;

        Ok(db)
    }

    /// Get a clone of the connection pool
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn conn(&self) -> AppResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                business_context TEXT NOT NULL,
                questionnaire_responses TEXT NOT NULL,
                claude_analysis TEXT,
                generated_content TEXT,
                plan_metadata TEXT,
                status TEXT NOT NULL DEFAULT 'in_progress',
                completion_percentage REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                completed_at TEXT
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS drafts (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_plans_user_id ON plans(user_id)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_plans_status ON plans(status)",
            [],
        )?;

        Ok(())
    }

    // ========================================================================
    // Plan operations
    // ========================================================================

    /// Insert a new plan row. JSON-capable fields arrive pre-serialized.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_plan(
        &self,
        id: &str,
        user_id: &str,
        business_context_json: &str,
        responses_json: &str,
        status: &str,
        completion_percentage: f64,
        now: &str,
    ) -> AppResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO plans (id, user_id, business_context, questionnaire_responses,
             status, completion_percentage, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![
                id,
                user_id,
                business_context_json,
                responses_json,
                status,
                completion_percentage,
                now,
            ],
        )?;

        Ok(())
    }

    /// Fetch a plan row in raw form: JSON columns come back as text values
    /// for the normalizer to parse.
    pub fn get_plan_raw(&self, id: &str) -> AppResult<Option<RawPlanRecord>> {
        let conn = self.conn()?;

        conn.query_row(
            "SELECT id, user_id, business_context, questionnaire_responses,
             claude_analysis, generated_content, plan_metadata, status,
             completion_percentage, created_at, updated_at, completed_at
             FROM plans WHERE id = ?1",
            params![id],
            |row| {
                let text_value = |s: String| serde_json::Value::String(s);
                Ok(RawPlanRecord {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    business_context: text_value(row.get(2)?),
                    questionnaire_responses: text_value(row.get(3)?),
                    claude_analysis: row.get::<_, Option<String>>(4)?.map(text_value),
                    generated_content: row.get::<_, Option<String>>(5)?.map(text_value),
                    plan_metadata: row.get::<_, Option<String>>(6)?.map(text_value),
                    status: row.get(7)?,
                    completion_percentage: row.get(8)?,
                    created_at: RawTemporal::Text(row.get(9)?),
                    updated_at: RawTemporal::Text(row.get(10)?),
                    completed_at: row.get::<_, Option<String>>(11)?.map(RawTemporal::Text),
                })
            },
        )
        .optional()
        .map_err(AppError::from)
    }

    /// Update a plan's status
    pub fn set_plan_status(&self, id: &str, status: &str, now: &str) -> AppResult<()> {
        let conn = self.conn()?;

        let updated = conn.execute(
            "UPDATE plans SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, status, now],
        )?;

        if updated == 0 {
            return Err(AppError::not_found(format!("Plan not found: {}", id)));
        }

        Ok(())
    }

    /// Attach the analysis payload to a plan
    pub fn attach_analysis(&self, id: &str, analysis_json: &str, now: &str) -> AppResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "UPDATE plans SET claude_analysis = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, analysis_json, now],
        )?;

        Ok(())
    }

    /// Attach the generated content, metadata, and terminal completed state
    pub fn complete_plan(
        &self,
        id: &str,
        content_json: &str,
        metadata_json: &str,
        now: &str,
    ) -> AppResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "UPDATE plans SET generated_content = ?2, plan_metadata = ?3,
             status = 'completed', updated_at = ?4, completed_at = ?4
             WHERE id = ?1",
            params![id, content_json, metadata_json, now],
        )?;

        Ok(())
    }

    /// Record a generation failure: error metadata plus failed status
    pub fn fail_plan(&self, id: &str, metadata_json: &str, now: &str) -> AppResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "UPDATE plans SET plan_metadata = ?2, status = 'failed', updated_at = ?3
             WHERE id = ?1",
            params![id, metadata_json, now],
        )?;

        Ok(())
    }

    /// List plan ids for a user, most recently updated first
    pub fn list_plan_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id FROM plans WHERE user_id = ?1 ORDER BY updated_at DESC",
        )?;

        let ids = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(ids)
    }

    // ========================================================================
    // Draft operations
    // ========================================================================

    /// Read a draft value by session key
    pub fn get_draft(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.conn()?;

        conn.query_row(
            "SELECT value FROM drafts WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(AppError::from)
    }

    /// Write a draft value, overwriting any previous value for the key
    pub fn set_draft(&self, key: &str, value: &str) -> AppResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO drafts (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
             updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;

        Ok(())
    }

    /// Delete a draft (explicit restart)
    pub fn delete_draft(&self, key: &str) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM drafts WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_db() -> Database {
        Database::new_in_memory().unwrap()
    }

    #[test]
    fn test_init_schema() {
        test_db();
    }

    #[test]
    fn test_from_pool_shares_the_database() {
        let db = test_db();
        let other = Database::from_pool(db.pool().clone());

        other.set_draft("shared-key", "shared-value").unwrap();
        assert_eq!(
            db.get_draft("shared-key").unwrap().as_deref(),
            Some("shared-value")
        );
    }

    #[test]
    fn test_insert_and_get_plan_raw() {
        let db = test_db();
        let now = Utc::now().to_rfc3339();

        db.insert_plan(
            "plan-001",
            "user@example.com",
            r#"{"industry":"SaaS"}"#,
            r#"{"industry":"SaaS","business-model":"B2B"}"#,
            "in_progress",
            100.0,
            &now,
        )
        .unwrap();

        let raw = db.get_plan_raw("plan-001").unwrap().unwrap();
        assert_eq!(raw.id, "plan-001");
        assert_eq!(raw.user_id, "user@example.com");
        assert_eq!(raw.status, "in_progress");
        // JSON columns come back as serialized text
        assert!(matches!(raw.business_context, serde_json::Value::String(_)));
        assert!(raw.claude_analysis.is_none());
        assert_eq!(raw.created_at, RawTemporal::Text(now.clone()));
    }

    #[test]
    fn test_get_plan_raw_missing() {
        let db = test_db();
        assert!(db.get_plan_raw("nope").unwrap().is_none());
    }

    #[test]
    fn test_status_transitions() {
        let db = test_db();
        let now = Utc::now().to_rfc3339();

        db.insert_plan("plan-002", "u", "{}", "{}", "in_progress", 100.0, &now)
            .unwrap();

        db.set_plan_status("plan-002", "analyzing", &now).unwrap();
        let raw = db.get_plan_raw("plan-002").unwrap().unwrap();
        assert_eq!(raw.status, "analyzing");

        db.complete_plan("plan-002", "{}", r#"{"version":"1.0.0"}"#, &now)
            .unwrap();
        let raw = db.get_plan_raw("plan-002").unwrap().unwrap();
        assert_eq!(raw.status, "completed");
        assert!(raw.completed_at.is_some());
        assert!(raw.generated_content.is_some());
    }

    #[test]
    fn test_set_status_on_missing_plan() {
        let db = test_db();
        let now = Utc::now().to_rfc3339();
        let err = db.set_plan_status("ghost", "analyzing", &now).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_fail_plan_records_metadata() {
        let db = test_db();
        let now = Utc::now().to_rfc3339();

        db.insert_plan("plan-003", "u", "{}", "{}", "analyzing", 100.0, &now)
            .unwrap();
        db.fail_plan("plan-003", r#"{"error":"upstream 500"}"#, &now)
            .unwrap();

        let raw = db.get_plan_raw("plan-003").unwrap().unwrap();
        assert_eq!(raw.status, "failed");
        assert!(raw.plan_metadata.is_some());
        assert!(raw.completed_at.is_none());
    }

    #[test]
    fn test_draft_roundtrip_and_overwrite() {
        let db = test_db();

        assert!(db.get_draft("session-1").unwrap().is_none());

        db.set_draft("session-1", r#"{"industry":"SaaS"}"#).unwrap();
        assert_eq!(
            db.get_draft("session-1").unwrap().as_deref(),
            Some(r#"{"industry":"SaaS"}"#)
        );

        db.set_draft("session-1", r#"{"industry":"Retail"}"#).unwrap();
        assert_eq!(
            db.get_draft("session-1").unwrap().as_deref(),
            Some(r#"{"industry":"Retail"}"#)
        );

        db.delete_draft("session-1").unwrap();
        assert!(db.get_draft("session-1").unwrap().is_none());
    }

    #[test]
    fn test_list_plan_ids_filters_by_user() {
        let db = test_db();
        let now = Utc::now().to_rfc3339();

        db.insert_plan("a", "alice", "{}", "{}", "completed", 100.0, &now)
            .unwrap();
        db.insert_plan("b", "bob", "{}", "{}", "completed", 100.0, &now)
            .unwrap();

        assert_eq!(db.list_plan_ids("alice").unwrap(), vec!["a".to_string()]);
    }
}
