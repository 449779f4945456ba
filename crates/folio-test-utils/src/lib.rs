//! Testing utilities for the folio workspace
//!
//! Shared fakes for driving a playground deterministically.

#![allow(missing_docs)]

use folio_playground::{
    Clock, Playground, PlaygroundConfig, RenderTarget, RenderedDocument, TargetError,
};
use folio_sandbox::{ConsoleLevel, ConsoleLine, ExecutionError, ExecutionReport, ExecutionRuntime};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetEvent {
    Replaced { sequence: u64, html: String },
    Cleared,
}

/// Render target that records every call; clones share the log
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    events: Arc<Mutex<Vec<TargetEvent>>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TargetEvent> {
        self.events.lock().clone()
    }

    pub fn replacements(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, TargetEvent::Replaced { .. }))
            .count()
    }

    /// HTML currently shown, `None` when never rendered or cleared since
    pub fn current_html(&self) -> Option<String> {
        match self.events.lock().last() {
            Some(TargetEvent::Replaced { html, .. }) => Some(html.clone()),
            _ => None,
        }
    }
}

impl RenderTarget for RecordingTarget {
    fn replace(&mut self, document: &RenderedDocument) -> Result<(), TargetError> {
        self.events.lock().push(TargetEvent::Replaced {
            sequence: document.sequence(),
            html: document.html().to_owned(),
        });
        Ok(())
    }

    fn clear(&mut self) -> Result<(), TargetError> {
        self.events.lock().push(TargetEvent::Cleared);
        Ok(())
    }
}

/// Render target whose writes always fail
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingTarget;

impl RenderTarget for FailingTarget {
    fn replace(&mut self, _document: &RenderedDocument) -> Result<(), TargetError> {
        Err(unavailable())
    }

    fn clear(&mut self) -> Result<(), TargetError> {
        Err(unavailable())
    }
}

fn unavailable() -> TargetError {
    TargetError::Io {
        path: "unavailable".into(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
    }
}

/// Runtime that records each executed source and returns a fixed outcome
///
/// Succeeds by echoing the source as one console line unless built with
/// [`RecordingRuntime::failing`]. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingRuntime {
    executed: Arc<Mutex<Vec<String>>>,
    failure: Option<ExecutionError>,
}

impl RecordingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: ExecutionError) -> Self {
        Self {
            executed: Arc::default(),
            failure: Some(failure),
        }
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().clone()
    }

    pub fn runs(&self) -> usize {
        self.executed.lock().len()
    }
}

impl ExecutionRuntime for RecordingRuntime {
    fn execute(&self, source: &str) -> Result<ExecutionReport, ExecutionError> {
        self.executed.lock().push(source.to_owned());
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(ExecutionReport {
                console: vec![ConsoleLine {
                    level: ConsoleLevel::Log,
                    text: source.to_owned(),
                }],
            }),
        }
    }
}

/// Config with no template loaded at build time
pub fn quiet_config() -> PlaygroundConfig {
    PlaygroundConfig::default().with_default_template(None)
}

/// Playground on a manual clock with recording target and runtime
pub struct Fixture {
    pub playground: Playground<RecordingTarget>,
    pub clock: ManualClock,
    pub target: RecordingTarget,
    pub runtime: RecordingRuntime,
}

pub fn fixture() -> Fixture {
    fixture_with(quiet_config(), RecordingRuntime::new())
}

pub fn fixture_with(config: PlaygroundConfig, runtime: RecordingRuntime) -> Fixture {
    let clock = ManualClock::new();
    let target = RecordingTarget::new();
    let playground = Playground::builder()
        .config(config)
        .clock(Arc::new(clock.clone()))
        .runtime(runtime.clone())
        .target(target.clone())
        .build();

    Fixture {
        playground,
        clock,
        target,
        runtime,
    }
}
