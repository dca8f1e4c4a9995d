// Database access layer (SQLite via sqlx).

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// A discovered combination. Records are immutable once created: there is
/// no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Element {
    pub id: i64,
    /// Lexicographically first word of the pair, lower-cased.
    pub word1: String,
    /// Lexicographically second word of the pair, lower-cased.
    pub word2: String,
    pub emoji: String,
    /// Lower-cased label. Unique across all records.
    pub text: String,
    pub created_at: String,
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS elements (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                word1 TEXT NOT NULL,
                word2 TEXT NOT NULL,
                emoji TEXT NOT NULL,
                text TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(word1, word2),
                UNIQUE(text)
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ── Elements ──────────────────────────────────────────────────────

    /// Look up a combination by its ordered word pair.
    pub async fn find_by_pair(
        &self,
        word1: &str,
        word2: &str,
    ) -> Result<Option<Element>, sqlx::Error> {
        let row = sqlx::query_as::<_, Element>(
            "SELECT id, word1, word2, emoji, text, created_at FROM elements WHERE word1 = ? AND word2 = ?",
        )
        .bind(word1)
        .bind(word2)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Look up a combination by its label alone.
    pub async fn find_by_text(&self, text: &str) -> Result<Option<Element>, sqlx::Error> {
        let row = sqlx::query_as::<_, Element>(
            "SELECT id, word1, word2, emoji, text, created_at FROM elements WHERE text = ?",
        )
        .bind(text)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn create_element(
        &self,
        word1: &str,
        word2: &str,
        emoji: &str,
        text: &str,
    ) -> Result<Element, sqlx::Error> {
        let row = sqlx::query_as::<_, Element>(
            "INSERT INTO elements (word1, word2, emoji, text) VALUES (?, ?, ?, ?) RETURNING id, word1, word2, emoji, text, created_at",
        )
        .bind(word1)
        .bind(word2)
        .bind(emoji)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_elements(&self) -> Result<Vec<Element>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Element>(
            "SELECT id, word1, word2, emoji, text, created_at FROM elements ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_elements(&self) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM elements")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        Database::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_by_pair() {
        let db = test_db().await;

        let element = db
            .create_element("monet", "wasser", "🌊", "wasserlandschaft")
            .await
            .unwrap();
        assert_eq!(element.word1, "monet");
        assert_eq!(element.word2, "wasser");
        assert_eq!(element.emoji, "🌊");
        assert_eq!(element.text, "wasserlandschaft");

        let found = db.find_by_pair("monet", "wasser").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().id, element.id);

        // Exact-match on the ordered pair: the reversed order is a miss.
        let reversed = db.find_by_pair("wasser", "monet").await.unwrap();
        assert!(reversed.is_none());
    }

    #[tokio::test]
    async fn test_find_by_text() {
        let db = test_db().await;

        db.create_element("monet", "wasser", "🌊", "wasserlandschaft")
            .await
            .unwrap();

        let found = db.find_by_text("wasserlandschaft").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().emoji, "🌊");

        let missing = db.find_by_text("lichtstimmung").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_and_count_elements() {
        let db = test_db().await;

        assert_eq!(db.count_elements().await.unwrap(), 0);
        assert!(db.list_elements().await.unwrap().is_empty());

        db.create_element("monet", "wasser", "🌊", "wasserlandschaft")
            .await
            .unwrap();
        db.create_element("degas", "theater", "🎭", "theaterszene")
            .await
            .unwrap();

        let elements = db.list_elements().await.unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text, "wasserlandschaft");
        assert_eq!(elements[1].text, "theaterszene");
        assert_eq!(db.count_elements().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unique_constraints() {
        let db = test_db().await;

        db.create_element("monet", "wasser", "🌊", "wasserlandschaft")
            .await
            .unwrap();

        // Same pair again.
        assert!(db
            .create_element("monet", "wasser", "🎨", "anderes")
            .await
            .is_err());

        // Different pair, same label.
        assert!(db
            .create_element("renoir", "seine", "🏞️", "wasserlandschaft")
            .await
            .is_err());
    }
}
