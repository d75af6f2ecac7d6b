//! One caller's quiz: `Idle → Loading → (Success | Error)` and its grades.
//!
//! A run is split into `begin_run` / `finish_run` so the lock is never held
//! across corpus I/O. Each `begin_run` hands out a newer ticket; a result that
//! arrives with a stale ticket is dropped, so a refresh supersedes whatever
//! run was still in flight.

use rand::Rng;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::corpus::Corpus;
use crate::errors::AppError;
use crate::generation::generator::{
    generate_questions, GenerateRequest, GeneratedQuiz, GenerationError,
};
use crate::generation::policy::GenerationPolicy;
use crate::grading::summary::{summarize_grades, unanswered, GradeMap, GradeSummary};

const MAX_GRADE: i32 = 100;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum QuizState {
    Idle,
    Loading,
    Success(GeneratedQuiz),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTicket(u64);

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub request: GenerateRequest,
    pub state: QuizState,
    pub grades: GradeMap,
    pub summary: GradeSummary,
}

#[derive(Debug)]
struct SessionInner {
    state: QuizState,
    grades: GradeMap,
    latest_run: u64,
}

#[derive(Debug)]
pub struct QuizSession {
    id: Uuid,
    request: GenerateRequest,
    inner: Mutex<SessionInner>,
}

impl QuizSession {
    pub fn new(request: GenerateRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            inner: Mutex::new(SessionInner {
                state: QuizState::Idle,
                grades: GradeMap::new(),
                latest_run: 0,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn begin_run(&self) -> RunTicket {
        let mut inner = self.inner.lock().await;
        inner.latest_run += 1;
        inner.state = QuizState::Loading;
        inner.grades.clear();
        RunTicket(inner.latest_run)
    }

    /// Applies a finished run. Returns `false` if a newer run has started
    /// since `ticket` was issued; the result is then discarded.
    pub async fn finish_run(
        &self,
        ticket: RunTicket,
        result: Result<GeneratedQuiz, GenerationError>,
    ) -> bool {
        let mut inner = self.inner.lock().await;
        if ticket.0 != inner.latest_run {
            info!(
                "Session {}: run {} superseded by run {}",
                self.id, ticket.0, inner.latest_run
            );
            return false;
        }

        match result {
            Ok(quiz) => {
                inner.grades = unanswered(quiz.questions.len());
                inner.state = QuizState::Success(quiz);
            }
            Err(e) => {
                warn!("Session {}: generation failed: {e}", self.id);
                inner.state = QuizState::Error(e.to_string());
            }
        }
        true
    }

    /// Runs a full generation for this session's request.
    pub async fn run<R: Rng + Send>(
        &self,
        corpus: &dyn Corpus,
        policy: &GenerationPolicy,
        rng: &mut R,
    ) -> SessionSnapshot {
        let ticket = self.begin_run().await;
        let result = generate_questions(corpus, policy, &self.request, rng).await;
        self.finish_run(ticket, result).await;
        self.snapshot().await
    }

    pub async fn set_grade(&self, index: usize, grade: Option<i32>) -> Result<GradeSummary, AppError> {
        if let Some(g) = grade {
            if !(0..=MAX_GRADE).contains(&g) {
                return Err(AppError::Validation(format!(
                    "grade {g} must be between 0 and {MAX_GRADE}"
                )));
            }
        }

        let mut inner = self.inner.lock().await;
        let slot = inner.grades.get_mut(&index).ok_or_else(|| {
            AppError::NotFound(format!("Question {index} not found in session {}", self.id))
        })?;
        *slot = grade;
        Ok(summarize_grades(&inner.grades))
    }

    /// Marks every question unanswered again.
    pub async fn clear_grades(&self) -> GradeSummary {
        let mut inner = self.inner.lock().await;
        for grade in inner.grades.values_mut() {
            *grade = None;
        }
        summarize_grades(&inner.grades)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.lock().await;
        SessionSnapshot {
            session_id: self.id,
            request: self.request.clone(),
            state: inner.state.clone(),
            grades: inner.grades.clone(),
            summary: summarize_grades(&inner.grades),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::fixtures::fixture_corpus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request() -> GenerateRequest {
        GenerateRequest {
            start_juz: 1,
            end_juz: 5,
            question_count: 4,
            excerpt_size: 5,
        }
    }

    async fn quiz(seed: u64) -> GeneratedQuiz {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_questions(&fixture_corpus(), &GenerationPolicy::default(), &request(), &mut rng)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_new_session_is_idle() {
        let session = QuizSession::new(request());
        let snapshot = session.snapshot().await;
        assert!(matches!(snapshot.state, QuizState::Idle));
        assert!(snapshot.grades.is_empty());
    }

    #[tokio::test]
    async fn test_run_succeeds_with_unanswered_grades() {
        let session = QuizSession::new(request());
        let mut rng = StdRng::seed_from_u64(1);
        let snapshot = session
            .run(&fixture_corpus(), &GenerationPolicy::default(), &mut rng)
            .await;

        match snapshot.state {
            QuizState::Success(quiz) => assert_eq!(quiz.questions.len(), 4),
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(snapshot.grades.len(), 4);
        assert_eq!(snapshot.summary.answered, 0);
    }

    #[tokio::test]
    async fn test_stale_run_is_discarded() {
        let session = QuizSession::new(request());
        let first = session.begin_run().await;
        let second = session.begin_run().await;

        assert!(!session.finish_run(first, Ok(quiz(1).await)).await);
        assert!(matches!(session.snapshot().await.state, QuizState::Loading));

        let latest = quiz(2).await;
        let latest_id = latest.quiz_id;
        assert!(session.finish_run(second, Ok(latest)).await);
        match session.snapshot().await.state {
            QuizState::Success(quiz) => assert_eq!(quiz.quiz_id, latest_id),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_run_reports_error() {
        let session = QuizSession::new(request());
        let ticket = session.begin_run().await;
        session
            .finish_run(
                ticket,
                Err(GenerationError::DataFault("juz 3 has no surahs".to_string())),
            )
            .await;
        match session.snapshot().await.state {
            QuizState::Error(msg) => assert!(msg.contains("juz 3")),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_grades_update_summary_and_clear() {
        let session = QuizSession::new(request());
        let ticket = session.begin_run().await;
        session.finish_run(ticket, Ok(quiz(3).await)).await;

        session.set_grade(0, Some(80)).await.unwrap();
        let summary = session.set_grade(2, Some(60)).await.unwrap();
        assert_eq!(summary.answered, 2);
        assert!((summary.average - 70.0).abs() < f64::EPSILON);

        let summary = session.set_grade(2, None).await.unwrap();
        assert_eq!(summary.answered, 1);

        let summary = session.clear_grades().await;
        assert_eq!(summary.answered, 0);
        assert_eq!(session.snapshot().await.grades.len(), 4);
    }

    #[tokio::test]
    async fn test_grade_validation() {
        let session = QuizSession::new(request());
        let ticket = session.begin_run().await;
        session.finish_run(ticket, Ok(quiz(4).await)).await;

        assert!(matches!(
            session.set_grade(0, Some(101)).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            session.set_grade(9, Some(50)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_new_run_resets_grades() {
        let session = QuizSession::new(request());
        let ticket = session.begin_run().await;
        session.finish_run(ticket, Ok(quiz(5).await)).await;
        session.set_grade(1, Some(90)).await.unwrap();

        let ticket = session.begin_run().await;
        assert!(session.snapshot().await.grades.is_empty());
        session.finish_run(ticket, Ok(quiz(6).await)).await;
        assert_eq!(session.snapshot().await.summary.answered, 0);
    }
}
