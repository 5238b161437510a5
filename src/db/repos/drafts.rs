//! Idea-keyed draft cache for generated content.
//!
//! Write-through on every content mutation; consulted on workspace open to
//! survive restarts. This is a cache, not a source of truth: last write
//! wins, no expiry, no eviction.

use rusqlite::params;

use crate::db::DbPool;
use crate::error::AppError;

/// Get the cached draft for an idea. Returns None when no draft exists.
pub fn get(pool: &DbPool, idea_id: &str) -> Result<Option<String>, AppError> {
    let conn = pool.get()?;
    let result = conn.query_row(
        "SELECT content FROM content_drafts WHERE idea_id = ?1",
        params![idea_id],
        |row| row.get::<_, String>(0),
    );

    match result {
        Ok(content) => Ok(Some(content)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(AppError::Database(e)),
    }
}

/// Write the draft for an idea, replacing any previous one.
pub fn set(pool: &DbPool, idea_id: &str, content: &str) -> Result<(), AppError> {
    let conn = pool.get()?;
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO content_drafts (idea_id, content, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(idea_id) DO UPDATE SET content = ?2, updated_at = ?3",
        params![idea_id, content, now],
    )?;
    Ok(())
}

/// Remove the draft for an idea. Returns true if a row was deleted.
pub fn delete(pool: &DbPool, idea_id: &str) -> Result<bool, AppError> {
    let conn = pool.get()?;
    let rows = conn.execute(
        "DELETE FROM content_drafts WHERE idea_id = ?1",
        params![idea_id],
    )?;
    Ok(rows > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_test_db;

    #[test]
    fn test_draft_roundtrip() {
        let pool = init_test_db().unwrap();

        assert_eq!(get(&pool, "idea-1").unwrap(), None);

        set(&pool, "idea-1", "Hello").unwrap();
        assert_eq!(get(&pool, "idea-1").unwrap(), Some("Hello".into()));

        // Last write wins.
        set(&pool, "idea-1", "Hello, edited").unwrap();
        assert_eq!(get(&pool, "idea-1").unwrap(), Some("Hello, edited".into()));

        // Drafts are keyed per idea.
        set(&pool, "idea-2", "Other").unwrap();
        assert_eq!(get(&pool, "idea-1").unwrap(), Some("Hello, edited".into()));

        assert!(delete(&pool, "idea-1").unwrap());
        assert_eq!(get(&pool, "idea-1").unwrap(), None);
        assert_eq!(get(&pool, "idea-2").unwrap(), Some("Other".into()));
    }
}
