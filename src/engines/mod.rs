pub mod evaluation;
pub mod translation;
