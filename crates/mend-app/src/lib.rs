//! HTTP layer for the mend remediation service.

pub mod routes;

pub use routes::{build_router, AppState};
