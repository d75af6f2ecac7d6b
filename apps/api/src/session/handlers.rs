//! Axum route handlers for quiz sessions.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::GenerateRequest;
use crate::grading::summary::GradeSummary;
use crate::session::quiz_session::{QuizSession, SessionSnapshot};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GradeUpdate {
    pub grade: Option<i32>,
}

async fn find_session(state: &AppState, id: Uuid) -> Result<Arc<QuizSession>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// POST /api/v1/sessions
///
/// Validates the request, opens a session and runs its first generation.
/// A data fault leaves the session in the `error` state rather than failing
/// the call, so the caller can refresh it.
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    request.validate(&state.policy)?;

    let session = state.sessions.insert(QuizSession::new(request)).await;
    info!(
        "Opened session {} ({} live)",
        session.id(),
        state.sessions.session_count().await
    );
    let mut rng = StdRng::from_entropy();
    let snapshot = session
        .run(state.corpus.as_ref(), &state.policy, &mut rng)
        .await;

    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, id).await?;
    Ok(Json(session.snapshot().await))
}

/// POST /api/v1/sessions/:id/refresh
///
/// Generates a fresh quiz for the same request, superseding any run still in
/// flight, and resets all grades.
pub async fn handle_refresh_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, id).await?;
    let mut rng = StdRng::from_entropy();
    let snapshot = session
        .run(state.corpus.as_ref(), &state.policy, &mut rng)
        .await;
    Ok(Json(snapshot))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// PUT /api/v1/sessions/:id/grades/:index
pub async fn handle_set_grade(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(update): Json<GradeUpdate>,
) -> Result<Json<GradeSummary>, AppError> {
    let session = find_session(&state, id).await?;
    let summary = session.set_grade(index, update.grade).await?;
    Ok(Json(summary))
}

/// DELETE /api/v1/sessions/:id/grades
pub async fn handle_clear_grades(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GradeSummary>, AppError> {
    let session = find_session(&state, id).await?;
    Ok(Json(session.clear_grades().await))
}
