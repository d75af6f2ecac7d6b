use axum::Json;
use serde::Deserialize;

use crate::grading::summary::{summarize_grades, GradeMap, GradeSummary};

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub grades: GradeMap,
}

/// POST /api/v1/grades/summary
pub async fn handle_summary(Json(request): Json<SummaryRequest>) -> Json<GradeSummary> {
    Json(summarize_grades(&request.grades))
}
