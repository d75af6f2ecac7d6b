use serde::{Deserialize, Serialize};

use crate::models::verse::Verse;

/// Inclusive span of verse ids inside a single surah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExcerptRange {
    pub start: i64,
    pub end: i64,
}

impl ExcerptRange {
    pub fn new(start: i64, end: i64) -> Self {
        debug_assert!(start <= end, "excerpt range must not be reversed");
        Self { start, end }
    }

    pub fn verse_count(&self) -> i64 {
        self.end - self.start + 1
    }

    pub fn overlaps(&self, other: &ExcerptRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True when any endpoint of `self` lies closer than `distance` to any
    /// endpoint of `other`.
    pub fn endpoints_within(&self, other: &ExcerptRange, distance: i64) -> bool {
        [self.start, self.end].iter().any(|&a| {
            [other.start, other.end]
                .iter()
                .any(|&b| (a - b).abs() < distance)
        })
    }
}

/// One accepted excerpt: the verses of `range`, ascending by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub juz: i32,
    pub surah: i32,
    pub range: ExcerptRange,
    pub verses: Vec<Verse>,
}

impl Question {
    pub fn first_verse_id(&self) -> i64 {
        self.verses.first().map(|v| v.id).unwrap_or(i64::MAX)
    }
}
