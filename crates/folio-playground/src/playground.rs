//! The playground renderer

use crate::buffer::{FragmentKind, SourceBuffer, SourceBuffers};
use crate::clock::{Clock, SystemClock};
use crate::config::PlaygroundConfig;
use crate::debounce::Debouncer;
use crate::document::RenderedDocument;
use crate::state_machine::{validate_transition, PlaygroundState};
use crate::target::{FrameTarget, RenderTarget};
use folio_sandbox::{ExecutionError, ExecutionReport, ExecutionRuntime, ScriptSandbox};
use folio_template::{load_dir, TemplateRegistry};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Live code playground
///
/// Owns three source buffers, a template registry and selector, a debounce
/// timer and a render target. Edits arm the debounce; [`Self::poll`] renders
/// once the quiet interval has passed. [`Self::render`] and
/// [`Self::load_template`] render immediately and cancel any pending timer.
///
/// Rendering never fails: a behavior fragment that throws is reported as a
/// visible notice inside the rendered document.
pub struct Playground<T: RenderTarget = FrameTarget> {
    config: PlaygroundConfig,
    registry: TemplateRegistry,
    buffers: SourceBuffers,
    selected: Option<String>,
    debounce: Debouncer,
    runtime: Box<dyn ExecutionRuntime + Send>,
    target: T,
    clock: Arc<dyn Clock>,
    state: PlaygroundState,
    sequence: u64,
    render_count: u64,
    last: Option<RenderedDocument>,
}

impl Playground<FrameTarget> {
    /// Start building a playground with an in-memory frame target
    #[must_use]
    pub fn builder() -> PlaygroundBuilder<FrameTarget> {
        PlaygroundBuilder::new()
    }
}

impl<T: RenderTarget> Playground<T> {
    /// Select a template by name, overwrite all buffers and render
    ///
    /// An unknown name leaves everything untouched and returns `false`.
    pub fn load_template(&mut self, name: &str) -> bool {
        let Some(template) = self.registry.get(name) else {
            tracing::debug!(template = name, "unknown template ignored");
            return false;
        };

        self.buffers.load(template);
        self.selected = Some(name.to_owned());
        tracing::info!(template = name, "template loaded");
        self.render();
        true
    }

    /// Replace one buffer and (re)arm the debounce timer
    pub fn set_buffer(&mut self, kind: FragmentKind, text: impl Into<String>) {
        self.buffers.set(kind, text);
        let deadline = self.debounce.arm(self.clock.now());
        self.transition(PlaygroundState::Editing);
        tracing::debug!(fragment = %kind, ?deadline, "render scheduled");
    }

    /// Render if the debounce deadline has passed
    pub fn poll(&mut self) -> Option<&RenderedDocument> {
        if self.debounce.take_due(self.clock.now()) {
            Some(self.render())
        } else {
            None
        }
    }

    /// Armed debounce deadline
    #[inline]
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// A debounced render is waiting
    #[inline]
    #[must_use]
    pub fn has_pending_render(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Render now
    ///
    /// Cancels any pending debounce, snapshots the buffers, executes the
    /// behavior fragment in a fresh sandbox, assembles the document and
    /// replaces the target's content.
    pub fn render(&mut self) -> &RenderedDocument {
        if self.debounce.cancel() {
            tracing::debug!("pending render superseded");
        }
        self.transition(PlaygroundState::Rendering);

        self.sequence += 1;
        let request = self.buffers.snapshot(self.sequence);
        let outcome = self.runtime.execute(request.behavior());
        if let Err(e) = &outcome {
            tracing::warn!(sequence = request.sequence(), "behavior error contained: {e}");
        }

        let document = RenderedDocument::assemble(&request, outcome, &self.config.base_style);
        if let Err(e) = self.target.replace(&document) {
            tracing::warn!(sequence = request.sequence(), "render target rejected document: {e}");
        }

        self.buffers.mark_clean();
        self.render_count += 1;
        self.transition(PlaygroundState::Idle);
        tracing::info!(
            sequence = document.sequence(),
            failed = document.error().is_some(),
            "rendered"
        );

        self.last.insert(document)
    }

    /// Clear buffers, selector, pending timer and target
    pub fn reset(&mut self) {
        self.debounce.cancel();
        self.buffers.clear();
        self.selected = None;
        self.last = None;
        if let Err(e) = self.target.clear() {
            tracing::warn!("render target could not be cleared: {e}");
        }
        self.transition(PlaygroundState::Idle);
        tracing::debug!("playground reset");
    }

    fn transition(&mut self, to: PlaygroundState) {
        if let Err(e) = validate_transition(self.state, to) {
            tracing::error!("{e}");
        }
        self.state = to;
    }

    /// Buffer for `kind`
    #[inline]
    #[must_use]
    pub fn buffer(&self, kind: FragmentKind) -> &SourceBuffer {
        self.buffers.get(kind)
    }

    /// All three buffers
    #[inline]
    #[must_use]
    pub fn buffers(&self) -> &SourceBuffers {
        &self.buffers
    }

    /// Name shown in the template selector
    #[inline]
    #[must_use]
    pub fn selected_template(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selectable templates
    #[inline]
    #[must_use]
    pub fn templates(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Current lifecycle state
    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaygroundState {
        self.state
    }

    /// Render target
    #[inline]
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Most recent document, cleared by reset
    #[inline]
    #[must_use]
    pub fn last_render(&self) -> Option<&RenderedDocument> {
        self.last.as_ref()
    }

    /// Outcome of the most recent render
    #[must_use]
    pub fn last_outcome(&self) -> Option<&Result<ExecutionReport, ExecutionError>> {
        self.last.as_ref().map(RenderedDocument::outcome)
    }

    /// Renders performed since construction
    #[inline]
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }
}

impl<T: RenderTarget + std::fmt::Debug> std::fmt::Debug for Playground<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playground")
            .field("state", &self.state)
            .field("selected", &self.selected)
            .field("pending", &self.debounce.deadline())
            .field("render_count", &self.render_count)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Playground`]
pub struct PlaygroundBuilder<T> {
    config: PlaygroundConfig,
    registry: Option<TemplateRegistry>,
    runtime: Option<Box<dyn ExecutionRuntime + Send>>,
    clock: Option<Arc<dyn Clock>>,
    target: T,
}

impl PlaygroundBuilder<FrameTarget> {
    fn new() -> Self {
        Self {
            config: PlaygroundConfig::default(),
            registry: None,
            runtime: None,
            clock: None,
            target: FrameTarget::new(),
        }
    }
}

impl<T: RenderTarget> PlaygroundBuilder<T> {
    /// With configuration
    #[must_use]
    pub fn config(mut self, config: PlaygroundConfig) -> Self {
        self.config = config;
        self
    }

    /// With template registry (defaults to the built-ins)
    #[must_use]
    pub fn registry(mut self, registry: TemplateRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// With execution runtime (defaults to [`ScriptSandbox`] from the config)
    #[must_use]
    pub fn runtime(mut self, runtime: impl ExecutionRuntime + Send + 'static) -> Self {
        self.runtime = Some(Box::new(runtime));
        self
    }

    /// With clock (defaults to [`SystemClock`])
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// With render target
    #[must_use]
    pub fn target<U: RenderTarget>(self, target: U) -> PlaygroundBuilder<U> {
        PlaygroundBuilder {
            config: self.config,
            registry: self.registry,
            runtime: self.runtime,
            clock: self.clock,
            target,
        }
    }

    /// Build, loading the configured default template if it exists
    ///
    /// Without an explicit registry, the built-ins are used plus any
    /// templates found under the configured templates directory.
    #[must_use]
    pub fn build(self) -> Playground<T> {
        let runtime = self
            .runtime
            .unwrap_or_else(|| Box::new(ScriptSandbox::new(self.config.sandbox.clone())));
        let registry = self
            .registry
            .unwrap_or_else(|| default_registry(self.config.templates_dir.as_deref()));
        let mut playground = Playground {
            debounce: Debouncer::new(self.config.debounce()),
            registry,
            buffers: SourceBuffers::new(),
            selected: None,
            runtime,
            target: self.target,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            state: PlaygroundState::Idle,
            sequence: 0,
            render_count: 0,
            last: None,
            config: self.config,
        };

        if let Some(name) = playground.config.default_template.clone() {
            playground.load_template(&name);
        }
        playground
    }
}

fn default_registry(templates_dir: Option<&Path>) -> TemplateRegistry {
    let mut registry = TemplateRegistry::with_builtins();
    if let Some(dir) = templates_dir {
        match load_dir(dir) {
            Ok(templates) => {
                tracing::debug!(dir = %dir.display(), count = templates.len(), "extra templates loaded");
                registry.extend(templates);
            }
            Err(e) => tracing::warn!(dir = %dir.display(), "templates directory ignored: {e}"),
        }
    }
    registry
}
