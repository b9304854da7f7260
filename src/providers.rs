//! Shared provider traits for dependency injection.
//!
//! External lookups are abstracted behind traits so modules can be tested in
//! isolation with deterministic implementations.

/// Trait for reading environment variables.
///
/// The shell resolver depends on `SHELL`/`COMSPEC`; injecting the lookup
/// keeps it a pure function of platform + environment and testable for every
/// platform identifier from any host.
///
/// # Example
///
/// ```
/// use cligpt::providers::{EnvProvider, SystemEnv};
///
/// let env = SystemEnv;
/// // PATH exists on any host we build on
/// assert!(env.var("PATH").is_some());
/// ```
pub trait EnvProvider: Send + Sync {
    /// Returns the value of the variable, or `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Default provider backed by the process environment.
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
