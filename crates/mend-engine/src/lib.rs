//! Engine implementation for mend: the remediation orchestrator and the
//! generator/scanner clients it drives.

pub mod generator;
pub mod orchestrator;
pub mod scanner;

pub use generator::OllamaGenerator;
pub use orchestrator::Orchestrator;
pub use scanner::CliScanner;
