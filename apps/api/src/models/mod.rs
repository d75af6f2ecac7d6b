pub mod quiz;
pub mod verse;
