//! Excerpt selector: picks a fresh window of ayat inside one surah.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::quiz::ExcerptRange;
use crate::models::verse::Verse;

/// Minimum id distance between endpoints of two excerpts in the same surah.
pub fn min_distance(surah_len: usize) -> i64 {
    if surah_len > 100 {
        10
    } else if surah_len > 50 {
        5
    } else {
        3
    }
}

/// Chooses a window of exactly `size` consecutive verses uniformly among all
/// windows that neither overlap nor come within `min_distance` of a range in
/// `used`. `verses` is one whole surah ascending by id and `used` holds the
/// ranges already accepted in that surah.
///
/// Returns `None` when no window survives.
pub fn select_excerpt<R: Rng + ?Sized>(
    verses: &[Verse],
    size: usize,
    used: &[ExcerptRange],
    rng: &mut R,
) -> Option<ExcerptRange> {
    if size == 0 || size > verses.len() {
        return None;
    }

    let distance = min_distance(verses.len());
    let candidates: Vec<ExcerptRange> = verses
        .windows(size)
        .map(|window| ExcerptRange::new(window[0].id, window[size - 1].id))
        .filter(|candidate| {
            !used
                .iter()
                .any(|u| candidate.overlaps(u) || candidate.endpoints_within(u, distance))
        })
        .collect();

    candidates.choose(rng).copied()
}
