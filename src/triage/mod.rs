pub mod advice;
pub mod facilities;
pub mod intake;
pub mod orchestrator;

pub use orchestrator::{Assessment, Services, run_assessment};
