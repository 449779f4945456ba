//! Sandbox limits and capture settings

use serde::{Deserialize, Serialize};

/// Configuration for [`crate::ScriptSandbox`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Maximum iterations of any single loop before execution is aborted
    pub loop_iteration_limit: u64,
    /// Maximum call depth before execution is aborted
    pub recursion_limit: usize,
    /// Whether console output is recorded in the execution report
    pub capture_console: bool,
    /// Upper bound on recorded console lines; later lines are dropped
    pub max_console_lines: usize,
}

impl SandboxConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With loop iteration limit
    #[inline]
    #[must_use]
    pub fn with_loop_iteration_limit(mut self, limit: u64) -> Self {
        self.loop_iteration_limit = limit;
        self
    }

    /// With recursion limit
    #[inline]
    #[must_use]
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// With console capture enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_console_capture(mut self, capture: bool) -> Self {
        self.capture_console = capture;
        self
    }

    /// With maximum number of recorded console lines
    #[inline]
    #[must_use]
    pub fn with_max_console_lines(mut self, max: usize) -> Self {
        self.max_console_lines = max;
        self
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            loop_iteration_limit: 1_000_000,
            recursion_limit: 256,
            capture_console: true,
            max_console_lines: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = SandboxConfig::new()
            .with_loop_iteration_limit(10)
            .with_recursion_limit(8)
            .with_console_capture(false)
            .with_max_console_lines(3);

        assert_eq!(config.loop_iteration_limit, 10);
        assert_eq!(config.recursion_limit, 8);
        assert!(!config.capture_console);
        assert_eq!(config.max_console_lines, 3);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: SandboxConfig = serde_json::from_str(r#"{"recursion_limit": 32}"#).unwrap();
        assert_eq!(config.recursion_limit, 32);
        assert_eq!(config.loop_iteration_limit, SandboxConfig::default().loop_iteration_limit);
        assert!(config.capture_console);
    }
}
