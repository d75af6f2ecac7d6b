//! Read-only access to the verse corpus.
//!
//! The generation engine only ever talks to `dyn Corpus`; `AppState` carries an
//! `Arc<dyn Corpus>` chosen at startup (SQLite-backed or a preloaded snapshot).

pub mod handlers;
pub mod memory;
pub mod sqlite;

#[cfg(test)]
pub mod fixtures;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::verse::Verse;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus query failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("inconsistent corpus data: {0}")]
    Inconsistent(String),
}

/// The corpus query surface. Implement this to add a backend without touching
/// the generator or the handlers.
#[async_trait]
pub trait Corpus: Send + Sync {
    /// Distinct surah numbers present in `juz`, ascending.
    async fn surahs_in_juz(&self, juz: i32) -> Result<Vec<i32>, CorpusError>;

    /// Every verse of `surah`, ascending by aya number.
    async fn verses_in_surah(&self, surah: i32) -> Result<Vec<Verse>, CorpusError>;

    /// Every verse of `juz`, ordered by surah then aya.
    async fn verses_in_juz(&self, juz: i32) -> Result<Vec<Verse>, CorpusError>;

    async fn verse_at(&self, surah: i32, aya: i32) -> Result<Option<Verse>, CorpusError>;
}
