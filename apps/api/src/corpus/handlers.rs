//! Axum route handlers for read-only corpus lookups.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::policy::{FIRST_JUZ, LAST_JUZ};
use crate::models::verse::Verse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JuzSurahsResponse {
    pub juz: i32,
    pub surahs: Vec<i32>,
}

fn check_juz(juz: i32) -> Result<(), AppError> {
    if (FIRST_JUZ..=LAST_JUZ).contains(&juz) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "juz {juz} must lie within {FIRST_JUZ}..{LAST_JUZ}"
        )))
    }
}

/// GET /api/v1/juz/:juz/surahs
pub async fn handle_juz_surahs(
    State(state): State<AppState>,
    Path(juz): Path<i32>,
) -> Result<Json<JuzSurahsResponse>, AppError> {
    check_juz(juz)?;
    let surahs = state.corpus.surahs_in_juz(juz).await?;
    Ok(Json(JuzSurahsResponse { juz, surahs }))
}

/// GET /api/v1/juz/:juz/verses
pub async fn handle_juz_verses(
    State(state): State<AppState>,
    Path(juz): Path<i32>,
) -> Result<Json<Vec<Verse>>, AppError> {
    check_juz(juz)?;
    Ok(Json(state.corpus.verses_in_juz(juz).await?))
}

/// GET /api/v1/surahs/:surah/verses
pub async fn handle_surah_verses(
    State(state): State<AppState>,
    Path(surah): Path<i32>,
) -> Result<Json<Vec<Verse>>, AppError> {
    let verses = state.corpus.verses_in_surah(surah).await?;
    if verses.is_empty() {
        return Err(AppError::NotFound(format!("Surah {surah} not found")));
    }
    Ok(Json(verses))
}

/// GET /api/v1/surahs/:surah/verses/:aya
pub async fn handle_verse(
    State(state): State<AppState>,
    Path((surah, aya)): Path<(i32, i32)>,
) -> Result<Json<Verse>, AppError> {
    state
        .corpus
        .verse_at(surah, aya)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Verse {surah}:{aya} not found")))
}
