//! CLI command implementations.

mod budget;
mod config;
mod doctor;
mod languages;
mod notes;
mod serve;
mod transcript;

pub use budget::run_budget;
pub use config::run_config;
pub use doctor::run_doctor;
pub use languages::run_languages;
pub use notes::run_notes;
pub use serve::run_serve;
pub use transcript::run_transcript;
