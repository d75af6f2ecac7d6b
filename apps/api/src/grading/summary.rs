use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sparse map from question index to a percentage grade. `None` = unanswered.
pub type GradeMap = BTreeMap<usize, Option<i32>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeSummary {
    pub answered: usize,
    pub average: f64,
}

/// Counts answered entries and averages their grades (0.0 when none).
pub fn summarize_grades(grades: &GradeMap) -> GradeSummary {
    let (answered, total) = grades
        .values()
        .flatten()
        .fold((0usize, 0i64), |(n, sum), &g| (n + 1, sum + g as i64));

    let average = if answered > 0 {
        total as f64 / answered as f64
    } else {
        0.0
    };

    GradeSummary { answered, average }
}

/// A fresh map with one unanswered entry per question.
pub fn unanswered(question_count: usize) -> GradeMap {
    (0..question_count).map(|i| (i, None)).collect()
}
