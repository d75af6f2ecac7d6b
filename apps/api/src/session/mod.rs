// Per-caller quiz sessions: generation lifecycle plus the grade map.
// Held in memory only; a restart drops every session.

pub mod handlers;
pub mod quiz_session;
pub mod store;
