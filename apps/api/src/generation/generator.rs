//! Question generation: orchestrates one quiz run.
//!
//! Flow: validate → divide juz range → per pick: candidate surahs → excerpt
//!       selection (bounded retries) → backfill any shortfall → global sort.
//!
//! All mutable bookkeeping for a run lives in `RunState`, owned by a single
//! `generate_questions` call. Nothing survives between runs.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::corpus::{Corpus, CorpusError};
use crate::generation::divider::divide_juz_range;
use crate::generation::excerpt::select_excerpt;
use crate::generation::policy::{GenerationPolicy, FIRST_JUZ, LAST_JUZ};
use crate::models::quiz::{ExcerptRange, Question};
use crate::models::verse::Verse;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for quiz generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub start_juz: i32,
    pub end_juz: i32,
    pub question_count: i32,
    /// Desired ayat per question before per-juz adjustment.
    pub excerpt_size: i32,
}

/// Immutable snapshot returned by a successful run.
///
/// `shortfall` > 0 means the corpus ran out of fresh excerpts before
/// `requested` questions could be built. That is still a success.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedQuiz {
    pub quiz_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub request: GenerateRequest,
    pub requested: usize,
    pub shortfall: usize,
    pub questions: Vec<Question>,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("data fault: {0}")]
    DataFault(String),
}

impl From<CorpusError> for GenerationError {
    fn from(e: CorpusError) -> Self {
        GenerationError::DataFault(e.to_string())
    }
}

impl GenerateRequest {
    /// Rejects malformed requests before any corpus access.
    pub fn validate(&self, policy: &GenerationPolicy) -> Result<(), GenerationError> {
        let juz_bounds = FIRST_JUZ..=LAST_JUZ;
        if !juz_bounds.contains(&self.start_juz) || !juz_bounds.contains(&self.end_juz) {
            return Err(GenerationError::InvalidRequest(format!(
                "juz range {}..{} must lie within {FIRST_JUZ}..{LAST_JUZ}",
                self.start_juz, self.end_juz
            )));
        }
        if self.start_juz > self.end_juz {
            return Err(GenerationError::InvalidRequest(format!(
                "start_juz {} is after end_juz {}",
                self.start_juz, self.end_juz
            )));
        }
        if self.question_count < 1 {
            return Err(GenerationError::InvalidRequest(
                "question_count must be at least 1".to_string(),
            ));
        }
        if self.question_count as usize > policy.max_question_count {
            return Err(GenerationError::InvalidRequest(format!(
                "question_count {} exceeds the maximum of {}",
                self.question_count, policy.max_question_count
            )));
        }
        if self.excerpt_size < 1 {
            return Err(GenerationError::InvalidRequest(
                "excerpt_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Accumulators threaded through one run.
#[derive(Debug, Default)]
struct RunState {
    used_surahs: HashSet<i32>,
    used_ranges: HashMap<i32, Vec<ExcerptRange>>,
    questions: Vec<Question>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one generation request against `corpus`.
///
/// Steps:
/// 1. validate the request
/// 2. divide the juz range into `question_count` picks
/// 3. resolve every pick to at most one question
/// 4. backfill: re-divide for the missing count; when a round adds nothing,
///    sweep every juz once; stop when a sweep adds nothing
/// 5. sort questions by first verse id
///
/// Any corpus fault aborts the run and discards partial results.
pub async fn generate_questions<R: Rng + Send>(
    corpus: &dyn Corpus,
    policy: &GenerationPolicy,
    request: &GenerateRequest,
    rng: &mut R,
) -> Result<GeneratedQuiz, GenerationError> {
    request.validate(policy)?;

    let juz_range: Vec<i32> = (request.start_juz..=request.end_juz).collect();
    let target = request.question_count as usize;
    let size = request.excerpt_size as usize;
    let mut run = RunState::default();

    info!(
        "Generating {target} questions from juz {}..={} (excerpt size {size})",
        request.start_juz, request.end_juz
    );

    let picks = divide_juz_range(&juz_range, target, rng);
    debug!("Juz picks: {picks:?}");
    resolve_picks(corpus, policy, &picks, size, target, &mut run, rng).await?;

    while run.questions.len() < target {
        let remaining = target - run.questions.len();
        let picks = divide_juz_range(&juz_range, remaining, rng);
        let mut added = resolve_picks(corpus, policy, &picks, size, target, &mut run, rng).await?;

        if added == 0 {
            let offset = rng.gen_range(0..juz_range.len());
            let sweep: Vec<i32> = juz_range
                .iter()
                .cycle()
                .skip(offset)
                .take(juz_range.len())
                .copied()
                .collect();
            debug!("Backfill round empty, sweeping {sweep:?}");
            added = resolve_picks(corpus, policy, &sweep, size, target, &mut run, rng).await?;
        }

        if added == 0 {
            break;
        }
    }

    let mut questions = run.questions;
    for question in &mut questions {
        question.verses.sort_by_key(|v| v.id);
    }
    questions.sort_by_key(Question::first_verse_id);

    let shortfall = target - questions.len();
    if shortfall > 0 {
        warn!(
            "Only {} of {target} questions could be generated from juz {}..={}",
            questions.len(),
            request.start_juz,
            request.end_juz
        );
    }
    info!("Generated {} questions", questions.len());

    Ok(GeneratedQuiz {
        quiz_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        request: request.clone(),
        requested: target,
        shortfall,
        questions,
    })
}

/// Resolves `picks` in order until `target` questions exist. Returns how many
/// questions were added.
async fn resolve_picks<R: Rng + Send>(
    corpus: &dyn Corpus,
    policy: &GenerationPolicy,
    picks: &[i32],
    size: usize,
    target: usize,
    run: &mut RunState,
    rng: &mut R,
) -> Result<usize, GenerationError> {
    let before = run.questions.len();
    for &juz in picks {
        if run.questions.len() >= target {
            break;
        }
        if let Some(question) = resolve_pick(corpus, policy, juz, size, run, rng).await? {
            run.questions.push(question);
        }
    }
    Ok(run.questions.len() - before)
}

/// Turns one juz pick into a question, trying up to
/// `policy.max_attempts_per_pick` candidate surahs.
async fn resolve_pick<R: Rng + Send>(
    corpus: &dyn Corpus,
    policy: &GenerationPolicy,
    juz: i32,
    size: usize,
    run: &mut RunState,
    rng: &mut R,
) -> Result<Option<Question>, GenerationError> {
    let surahs = corpus.surahs_in_juz(juz).await?;
    if surahs.is_empty() {
        return Err(GenerationError::DataFault(format!("juz {juz} has no surahs")));
    }

    let mut tiers = candidate_tiers(&surahs, juz, policy, &run.used_surahs);
    debug!("Candidate surahs in juz {juz}: {tiers:?}");

    for attempt in 1..=policy.max_attempts_per_pick {
        let Some(tier) = tiers.iter_mut().find(|tier| !tier.is_empty()) else {
            break;
        };
        let Some(&surah) = tier.choose(rng) else {
            break;
        };
        tier.retain(|&s| s != surah);

        if !policy.is_reusable(surah) {
            run.used_surahs.insert(surah);
        }

        let verses = load_surah(corpus, surah).await?;
        let effective = policy.effective_size(juz, size, verses.len());
        let used = run
            .used_ranges
            .get(&surah)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        match select_excerpt(&verses, effective, used, rng) {
            Some(range) if !used.contains(&range) => {
                debug!(
                    "Juz {juz}: surah {surah} ayat {}..={} ({} verses)",
                    range.start,
                    range.end,
                    range.verse_count()
                );
                run.used_ranges.entry(surah).or_default().push(range);
                return Ok(Some(build_question(surah, range, &verses)));
            }
            _ => debug!(
                "Attempt {attempt}/{}: no fresh excerpt of {effective} in surah {surah}",
                policy.max_attempts_per_pick
            ),
        }
    }

    debug!("Skipping pick in juz {juz}: no fresh excerpt found");
    Ok(None)
}

/// Candidate surahs for a pick, in preference order.
///
/// First tier: surahs not yet used in this run. Second tier: the used ones,
/// reached only when the first is exhausted. The intro surah is dropped when
/// the policy excludes it, unless it is the only surah the juz has.
fn candidate_tiers(
    surahs: &[i32],
    juz: i32,
    policy: &GenerationPolicy,
    used: &HashSet<i32>,
) -> Vec<Vec<i32>> {
    let exclude_intro = policy.excludes_intro(juz);
    let allowed: Vec<i32> = surahs
        .iter()
        .copied()
        .filter(|&s| !(exclude_intro && s == policy.intro_surah))
        .collect();

    if allowed.is_empty() {
        return vec![surahs.to_vec()];
    }

    let (fresh, repeated): (Vec<i32>, Vec<i32>) =
        allowed.into_iter().partition(|s| !used.contains(s));
    vec![fresh, repeated]
}

/// Loads one surah and checks the structural guarantees the selector relies on.
async fn load_surah(corpus: &dyn Corpus, surah: i32) -> Result<Vec<Verse>, GenerationError> {
    let verses = corpus.verses_in_surah(surah).await?;

    if verses.is_empty() {
        return Err(GenerationError::DataFault(format!(
            "surah {surah} is listed in a juz but has no verses"
        )));
    }
    if let Some(stray) = verses.iter().find(|v| v.surah != surah) {
        return Err(GenerationError::DataFault(format!(
            "verse {} belongs to surah {}, not {surah}",
            stray.id, stray.surah
        )));
    }
    if !verses.windows(2).all(|w| w[0].id < w[1].id) {
        return Err(GenerationError::DataFault(format!(
            "verse ids of surah {surah} are not ascending"
        )));
    }

    Ok(verses)
}

fn build_question(surah: i32, range: ExcerptRange, verses: &[Verse]) -> Question {
    let verses: Vec<Verse> = verses
        .iter()
        .filter(|v| range.start <= v.id && v.id <= range.end)
        .cloned()
        .collect();

    Question {
        juz: verses.first().map(|v| v.juz).unwrap_or_default(),
        surah,
        range,
        verses,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
