//! Sandboxed script execution backed by the boa engine

use crate::config::SandboxConfig;
use crate::error::{ExecutionError, SandboxError};
use crate::runtime::{ConsoleLine, ExecutionReport, ExecutionRuntime};
use boa_engine::property::Attribute;
use boa_engine::{Context, JsString, Source};
use serde::Deserialize;

const SHIM: &str = include_str!("shim.js");
const HARNESS: &str = include_str!("harness.js");
const SOURCE_KEY: &str = "__folio_source";

/// Outcome reported back from inside the engine
#[derive(Debug, Deserialize)]
struct Outcome {
    failure: Option<ExecutionError>,
    console: Vec<ConsoleLine>,
}

/// Isolated executor for behavior fragments
///
/// Holds configuration only; all engine state lives in a context that is
/// created and dropped inside [`ExecutionRuntime::execute`].
#[derive(Debug, Clone, Default)]
pub struct ScriptSandbox {
    config: SandboxConfig,
}

impl ScriptSandbox {
    /// Create sandbox with configuration
    #[inline]
    #[must_use]
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    fn fresh_context(&self) -> Result<Context, SandboxError> {
        let mut context = Context::default();
        let limits = context.runtime_limits_mut();
        limits.set_loop_iteration_limit(self.config.loop_iteration_limit);
        limits.set_recursion_limit(self.config.recursion_limit);

        context
            .eval(Source::from_bytes(SHIM))
            .map_err(|e| SandboxError::Shim(e.to_string()))?;
        Ok(context)
    }

    fn run(&self, source: &str) -> Result<Result<ExecutionReport, ExecutionError>, SandboxError> {
        let mut context = self.fresh_context()?;

        context
            .register_global_property(
                JsString::from(SOURCE_KEY),
                JsString::from(source),
                Attribute::all(),
            )
            .map_err(|e| SandboxError::Engine(e.to_string()))?;

        // Errors the in-engine boundary cannot catch (runtime limits) surface here.
        let value = match context.eval(Source::from_bytes(HARNESS)) {
            Ok(value) => value,
            Err(e) => return Ok(Err(ExecutionError::from_display(&e.to_string()))),
        };
        let json = value
            .to_string(&mut context)
            .map_err(|e| SandboxError::Engine(e.to_string()))?
            .to_std_string_escaped();

        let outcome: Outcome = serde_json::from_str(&json)?;
        match outcome.failure {
            Some(failure) => Ok(Err(failure)),
            None => Ok(Ok(self.report(outcome.console))),
        }
    }

    fn report(&self, mut console: Vec<ConsoleLine>) -> ExecutionReport {
        if !self.config.capture_console {
            console.clear();
        }
        console.truncate(self.config.max_console_lines);
        ExecutionReport { console }
    }
}

impl ExecutionRuntime for ScriptSandbox {
    fn execute(&self, source: &str) -> Result<ExecutionReport, ExecutionError> {
        if source.trim().is_empty() {
            return Ok(ExecutionReport::default());
        }

        let result = self.run(source).unwrap_or_else(|e| Err(e.into()));
        if let Err(e) = &result {
            tracing::debug!("behavior fragment failed: {e}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_skips_engine() {
        let sandbox = ScriptSandbox::default();
        let report = sandbox.execute("  \n\t").unwrap();
        assert!(report.console.is_empty());
    }

    #[test]
    fn shim_installs_cleanly() {
        let sandbox = ScriptSandbox::default();
        assert!(sandbox.fresh_context().is_ok());
    }

    #[test]
    fn source_key_is_removed_before_user_code() {
        let sandbox = ScriptSandbox::default();
        let report = sandbox
            .execute("console.log(typeof globalThis.__folio_source)")
            .unwrap();
        assert_eq!(report.console_text(), "undefined");
    }

    #[test]
    fn console_capture_can_be_disabled() {
        let sandbox = ScriptSandbox::new(SandboxConfig::new().with_console_capture(false));
        let report = sandbox.execute("console.log('quiet')").unwrap();
        assert!(report.console.is_empty());
    }

    #[test]
    fn console_lines_are_capped() {
        let sandbox = ScriptSandbox::new(SandboxConfig::new().with_max_console_lines(2));
        let report = sandbox
            .execute("console.log(1); console.log(2); console.log(3);")
            .unwrap();
        assert_eq!(report.console_text(), "1\n2");
    }
}
