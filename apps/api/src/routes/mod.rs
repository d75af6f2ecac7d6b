pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::corpus::handlers as corpus;
use crate::generation::handlers as generation;
use crate::grading::handlers as grading;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless generation and aggregation
        .route("/api/v1/quizzes/generate", post(generation::handle_generate))
        .route("/api/v1/grades/summary", post(grading::handle_summary))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/refresh",
            post(session::handle_refresh_session),
        )
        .route(
            "/api/v1/sessions/:id/grades",
            delete(session::handle_clear_grades),
        )
        .route(
            "/api/v1/sessions/:id/grades/:index",
            put(session::handle_set_grade),
        )
        // Corpus lookups
        .route("/api/v1/juz/:juz/surahs", get(corpus::handle_juz_surahs))
        .route("/api/v1/juz/:juz/verses", get(corpus::handle_juz_verses))
        .route(
            "/api/v1/surahs/:surah/verses",
            get(corpus::handle_surah_verses),
        )
        .route(
            "/api/v1/surahs/:surah/verses/:aya",
            get(corpus::handle_verse),
        )
        .with_state(state)
}
