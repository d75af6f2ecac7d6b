// Question generation engine.
// Implements: juz range division, excerpt selection, and the generation run.
// Pure over `dyn Corpus` and an injected RNG, no HTTP or database types here.

pub mod divider;
pub mod excerpt;
pub mod generator;
pub mod handlers;
pub mod policy;
