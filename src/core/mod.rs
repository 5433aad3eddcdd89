mod arguments;
mod engine;
mod pipeline;
mod revision;
mod runner;

pub use arguments::ArgumentRewriter;
pub use pipeline::{Pipeline, StepKind};
pub use revision::RevisionScanner;
pub use runner::{ProcessRunner, StepStatus, SystemRunner};

// Export the main engine
pub use engine::{Engine, Outcome};
