//! Process-boundary adapters for mend: configuration loading.

pub mod config;

pub use config::Config;
