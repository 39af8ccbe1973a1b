//! Process-environment configuration.
//!
//! Every handler names its required variables explicitly; a missing variable
//! is a hard failure before any deletion is attempted.

pub fn require_env(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("{name} must be configured"))
}
