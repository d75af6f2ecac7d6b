//! Axum route handlers for stateless quiz generation.

use axum::{extract::State, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::errors::AppError;
use crate::generation::generator::{generate_questions, GenerateRequest, GeneratedQuiz};
use crate::state::AppState;

/// POST /api/v1/quizzes/generate
///
/// Runs one generation request and returns the snapshot. Nothing is stored.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedQuiz>, AppError> {
    let mut rng = StdRng::from_entropy();
    let quiz = generate_questions(state.corpus.as_ref(), &state.policy, &request, &mut rng).await?;
    Ok(Json(quiz))
}
