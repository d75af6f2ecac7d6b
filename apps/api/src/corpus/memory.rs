use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use crate::corpus::{Corpus, CorpusError};
use crate::models::verse::Verse;

/// Immutable in-memory snapshot of the corpus.
///
/// Built once (from `SqliteCorpus::load_all` or a test fixture) and shared
/// behind an `Arc`; every query is a lookup into prebuilt indexes.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    by_surah: BTreeMap<i32, Vec<Verse>>,
    surahs_by_juz: BTreeMap<i32, BTreeSet<i32>>,
}

impl MemoryCorpus {
    pub fn new(verses: Vec<Verse>) -> Self {
        let mut by_surah: BTreeMap<i32, Vec<Verse>> = BTreeMap::new();
        let mut surahs_by_juz: BTreeMap<i32, BTreeSet<i32>> = BTreeMap::new();

        for verse in verses {
            surahs_by_juz.entry(verse.juz).or_default().insert(verse.surah);
            by_surah.entry(verse.surah).or_default().push(verse);
        }
        for verses in by_surah.values_mut() {
            verses.sort_by_key(|v| (v.aya, v.id));
        }

        Self {
            by_surah,
            surahs_by_juz,
        }
    }

    pub fn verse_count(&self) -> usize {
        self.by_surah.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl Corpus for MemoryCorpus {
    async fn surahs_in_juz(&self, juz: i32) -> Result<Vec<i32>, CorpusError> {
        Ok(self
            .surahs_by_juz
            .get(&juz)
            .map(|surahs| surahs.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn verses_in_surah(&self, surah: i32) -> Result<Vec<Verse>, CorpusError> {
        Ok(self.by_surah.get(&surah).cloned().unwrap_or_default())
    }

    async fn verses_in_juz(&self, juz: i32) -> Result<Vec<Verse>, CorpusError> {
        let Some(surahs) = self.surahs_by_juz.get(&juz) else {
            return Ok(Vec::new());
        };
        // by_surah is keyed and sorted by surah, verses inside by aya
        Ok(surahs
            .iter()
            .filter_map(|surah| self.by_surah.get(surah))
            .flat_map(|verses| verses.iter().filter(|v| v.juz == juz).cloned())
            .collect())
    }

    async fn verse_at(&self, surah: i32, aya: i32) -> Result<Option<Verse>, CorpusError> {
        Ok(self
            .by_surah
            .get(&surah)
            .and_then(|verses| verses.iter().find(|v| v.aya == aya))
            .cloned())
    }
}
