// Grade aggregation for a generated quiz.

pub mod handlers;
pub mod summary;
