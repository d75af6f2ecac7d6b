use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

use crate::corpus::{Corpus, CorpusError};
use crate::models::verse::Verse;

const VERSE_COLUMNS: &str = "id, jozz, sura_no, sura_name_en, sura_name_ar, page, aya_no, \
                             aya_text, aya_text_emlaey";

/// Corpus backed by the pre-built `quran` table.
#[derive(Clone)]
pub struct SqliteCorpus {
    pool: SqlitePool,
}

impl SqliteCorpus {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Reads the whole table in mushaf order. Used to build a `MemoryCorpus`.
    pub async fn load_all(&self) -> Result<Vec<Verse>, CorpusError> {
        let verses = sqlx::query_as::<_, Verse>(&format!(
            "SELECT {VERSE_COLUMNS} FROM quran ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        if verses.is_empty() {
            return Err(CorpusError::Inconsistent(
                "the quran table has no rows".to_string(),
            ));
        }
        info!("Loaded {} verses from corpus", verses.len());
        Ok(verses)
    }
}

#[async_trait]
impl Corpus for SqliteCorpus {
    async fn surahs_in_juz(&self, juz: i32) -> Result<Vec<i32>, CorpusError> {
        let surahs: Vec<i32> =
            sqlx::query_scalar("SELECT DISTINCT sura_no FROM quran WHERE jozz = ? ORDER BY sura_no")
                .bind(juz)
                .fetch_all(&self.pool)
                .await?;
        Ok(surahs)
    }

    async fn verses_in_surah(&self, surah: i32) -> Result<Vec<Verse>, CorpusError> {
        let verses = sqlx::query_as::<_, Verse>(&format!(
            "SELECT {VERSE_COLUMNS} FROM quran WHERE sura_no = ? ORDER BY aya_no"
        ))
        .bind(surah)
        .fetch_all(&self.pool)
        .await?;
        Ok(verses)
    }

    async fn verses_in_juz(&self, juz: i32) -> Result<Vec<Verse>, CorpusError> {
        let verses = sqlx::query_as::<_, Verse>(&format!(
            "SELECT {VERSE_COLUMNS} FROM quran WHERE jozz = ? ORDER BY sura_no, aya_no"
        ))
        .bind(juz)
        .fetch_all(&self.pool)
        .await?;
        Ok(verses)
    }

    async fn verse_at(&self, surah: i32, aya: i32) -> Result<Option<Verse>, CorpusError> {
        let verse = sqlx::query_as::<_, Verse>(&format!(
            "SELECT {VERSE_COLUMNS} FROM quran WHERE sura_no = ? AND aya_no = ? LIMIT 1"
        ))
        .bind(surah)
        .bind(aya)
        .fetch_optional(&self.pool)
        .await?;
        Ok(verse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn seeded_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE quran (
                id INTEGER PRIMARY KEY,
                jozz INTEGER,
                sura_no INTEGER,
                sura_name_en TEXT,
                sura_name_ar TEXT,
                page INTEGER,
                line_start INTEGER,
                line_end INTEGER,
                aya_no INTEGER,
                aya_text TEXT,
                aya_text_emlaey TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        // surah 1 (3 ayat, juz 1), surah 2 (4 ayat, split over juz 1 and 2)
        let rows = [
            (1, 1, 1, 1),
            (2, 1, 1, 2),
            (3, 1, 1, 3),
            (4, 1, 2, 1),
            (5, 1, 2, 2),
            (6, 2, 2, 3),
            (7, 2, 2, 4),
        ];
        for (id, juz, surah, aya) in rows {
            sqlx::query(
                "INSERT INTO quran (id, jozz, sura_no, sura_name_en, page, aya_no, aya_text) \
                 VALUES (?, ?, ?, ?, 1, ?, ?)",
            )
            .bind(id)
            .bind(juz)
            .bind(surah)
            .bind(format!("Surah {surah}"))
            .bind(aya)
            .bind(format!("text {surah}:{aya}"))
            .execute(&pool)
            .await
            .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn test_surahs_in_juz_are_distinct_and_sorted() {
        let corpus = SqliteCorpus::new(seeded_pool().await);
        assert_eq!(corpus.surahs_in_juz(1).await.unwrap(), vec![1, 2]);
        assert_eq!(corpus.surahs_in_juz(2).await.unwrap(), vec![2]);
        assert!(corpus.surahs_in_juz(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_verses_in_surah_spans_juz_boundary() {
        let corpus = SqliteCorpus::new(seeded_pool().await);
        let verses = corpus.verses_in_surah(2).await.unwrap();
        let ayat: Vec<i32> = verses.iter().map(|v| v.aya).collect();
        assert_eq!(ayat, vec![1, 2, 3, 4]);
        assert_eq!(verses[3].juz, 2);
        assert_eq!(verses[0].surah_name_en.as_deref(), Some("Surah 2"));
        assert!(verses[0].text_plain.is_none());
    }

    #[tokio::test]
    async fn test_verses_in_juz_ordered_by_surah_then_aya() {
        let corpus = SqliteCorpus::new(seeded_pool().await);
        let ids: Vec<i64> = corpus
            .verses_in_juz(1)
            .await
            .unwrap()
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_verse_at_exact_position() {
        let corpus = SqliteCorpus::new(seeded_pool().await);
        let verse = corpus.verse_at(2, 3).await.unwrap().unwrap();
        assert_eq!(verse.id, 6);
        assert_eq!(verse.text, "text 2:3");
        assert!(corpus.verse_at(2, 9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_all_returns_every_row() {
        let corpus = SqliteCorpus::new(seeded_pool().await);
        assert_eq!(corpus.load_all().await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_load_all_rejects_empty_table() {
        let pool = seeded_pool().await;
        sqlx::query("DELETE FROM quran").execute(&pool).await.unwrap();
        let result = SqliteCorpus::new(pool).load_all().await;
        assert!(matches!(result, Err(CorpusError::Inconsistent(_))));
    }
}
