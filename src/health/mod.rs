// src/health/mod.rs
mod checker;
mod status;

pub use checker::ConnectivityChecker;
pub use status::{CheckResult, CheckStatus, ServiceName};
