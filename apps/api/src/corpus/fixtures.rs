//! Synthetic corpus used by the algorithm tests: every juz 1..=30 is populated,
//! surahs cross juz boundaries at the start, and juz 30 holds many short surahs.

use crate::corpus::memory::MemoryCorpus;
use crate::models::verse::Verse;

pub fn verse(id: i64, juz: i32, surah: i32, aya: i32) -> Verse {
    Verse {
        id,
        juz,
        surah,
        surah_name_en: Some(format!("Surah {surah}")),
        surah_name_ar: None,
        page: None,
        aya,
        text: format!("{surah}:{aya}"),
        text_plain: None,
    }
}

/// (surah, [(juz, ayat in that juz)]) in mushaf order.
fn layout() -> Vec<(i32, Vec<(i32, i32)>)> {
    let mut layout = vec![
        (1, vec![(1, 7)]),
        (2, vec![(1, 141), (2, 111), (3, 34)]),
        (3, vec![(3, 92), (4, 108)]),
        (4, vec![(4, 23), (5, 124), (6, 29)]),
    ];
    for surah in 5..=27 {
        layout.push((surah, vec![(surah + 2, 60 + (surah % 4) * 20)]));
    }
    for surah in 28..=40 {
        layout.push((surah, vec![(30, 5 + (surah % 7) * 4)]));
    }
    layout.push((41, vec![(30, 3)]));
    layout
}

/// Builds a corpus from a layout, assigning ids in mushaf order.
pub fn corpus_from_layout(layout: &[(i32, Vec<(i32, i32)>)]) -> MemoryCorpus {
    let mut verses = Vec::new();
    let mut id = 0;
    for (surah, parts) in layout {
        let mut aya = 0;
        for &(juz, count) in parts {
            for _ in 0..count {
                id += 1;
                aya += 1;
                verses.push(verse(id, juz, *surah, aya));
            }
        }
    }
    MemoryCorpus::new(verses)
}

pub fn fixture_corpus() -> MemoryCorpus {
    corpus_from_layout(&layout())
}
