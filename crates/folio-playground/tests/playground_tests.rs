//! Playground renderer tests
//!
//! Debounce, template loading, containment, isolation and reset, run
//! against a manual clock and recording fakes, plus the real sandbox where
//! engine behavior matters.

use folio_playground::{
    FragmentKind, FrameTarget, Playground, PlaygroundConfig, PlaygroundState,
};
use folio_sandbox::ExecutionError;
use folio_template::TemplateRegistry;
use folio_test_utils::{
    fixture, fixture_with, quiet_config, FailingTarget, RecordingRuntime, TargetEvent,
};
use pretty_assertions::assert_eq;

fn sandboxed() -> Playground<FrameTarget> {
    Playground::builder().config(quiet_config()).build()
}

// ============================================================================
// Debounce
// ============================================================================

#[test]
fn test_burst_of_edits_renders_once_with_last_state() {
    let mut f = fixture();

    for i in 0..5 {
        f.playground
            .set_buffer(FragmentKind::Behavior, format!("step{i}"));
        f.clock.advance_ms(300);
        assert!(f.playground.poll().is_none());
    }
    assert_eq!(f.runtime.runs(), 0);

    f.clock.advance_ms(700);
    let document = f.playground.poll().expect("render is due");
    assert_eq!(document.sequence(), 1);

    assert_eq!(f.runtime.executed(), vec!["step4".to_string()]);
    assert_eq!(f.playground.render_count(), 1);
    assert_eq!(f.target.replacements(), 1);
}

#[test]
fn test_set_buffer_never_renders_immediately() {
    let mut f = fixture();
    f.playground.set_buffer(FragmentKind::Structure, "<p>");

    assert_eq!(f.playground.state(), PlaygroundState::Editing);
    assert!(f.playground.has_pending_render());
    assert!(f.playground.buffer(FragmentKind::Structure).is_dirty());
    assert_eq!(f.target.replacements(), 0);
}

#[test]
fn test_deadline_is_rearmed_on_each_edit() {
    let mut f = fixture();
    f.playground.set_buffer(FragmentKind::Structure, "a");
    let first = f.playground.next_deadline().unwrap();

    f.clock.advance_ms(400);
    f.playground.set_buffer(FragmentKind::Presentation, "b");
    let second = f.playground.next_deadline().unwrap();

    assert_eq!(second.duration_since(first).as_millis(), 400);
}

#[test]
fn test_poll_returns_to_idle_and_clears_dirty() {
    let mut f = fixture();
    f.playground.set_buffer(FragmentKind::Behavior, "x");
    f.clock.advance_ms(1000);

    assert!(f.playground.poll().is_some());
    assert_eq!(f.playground.state(), PlaygroundState::Idle);
    assert!(!f.playground.buffers().is_dirty());
    assert!(!f.playground.has_pending_render());
}

#[test]
fn test_configured_debounce_interval() {
    let mut f = fixture_with(quiet_config().with_debounce_ms(50), RecordingRuntime::new());
    f.playground.set_buffer(FragmentKind::Behavior, "x");

    f.clock.advance_ms(49);
    assert!(f.playground.poll().is_none());
    f.clock.advance_ms(1);
    assert!(f.playground.poll().is_some());
}

#[test]
fn test_explicit_render_cancels_pending_timer() {
    let mut f = fixture();
    f.playground.set_buffer(FragmentKind::Behavior, "pending");
    f.clock.advance_ms(200);

    f.playground.render();
    assert!(!f.playground.has_pending_render());

    f.clock.advance_ms(5000);
    assert!(f.playground.poll().is_none());
    assert_eq!(f.playground.render_count(), 1);
}

// ============================================================================
// Templates
// ============================================================================

#[test]
fn test_load_template_overwrites_all_buffers() {
    let mut f = fixture();
    f.playground.set_buffer(FragmentKind::Structure, "stale");

    assert!(f.playground.load_template("calculator"));

    let registry = TemplateRegistry::with_builtins();
    let calculator = registry.get("calculator").unwrap();
    let buffers = f.playground.buffers();
    assert_eq!(buffers.text(FragmentKind::Structure), calculator.structure());
    assert_eq!(buffers.text(FragmentKind::Presentation), calculator.presentation());
    assert_eq!(buffers.text(FragmentKind::Behavior), calculator.behavior());
    assert_eq!(f.playground.selected_template(), Some("calculator"));
}

#[test]
fn test_load_template_renders_immediately_and_cancels_timer() {
    let mut f = fixture();
    f.playground.set_buffer(FragmentKind::Behavior, "pending");
    assert!(f.playground.load_template("todo"));

    assert_eq!(f.playground.render_count(), 1);
    assert_eq!(f.playground.state(), PlaygroundState::Idle);

    f.clock.advance_ms(2000);
    assert!(f.playground.poll().is_none());
    assert_eq!(f.playground.render_count(), 1);
}

#[test]
fn test_unknown_template_is_a_no_op() {
    let mut f = fixture();
    f.playground.load_template("calculator");
    f.playground.set_buffer(FragmentKind::Behavior, "edited");

    let buffers = f.playground.buffers().clone();
    let deadline = f.playground.next_deadline();
    let events = f.target.events();

    assert!(!f.playground.load_template("nonexistent"));

    assert_eq!(f.playground.buffers(), &buffers);
    assert_eq!(f.playground.selected_template(), Some("calculator"));
    assert_eq!(f.playground.next_deadline(), deadline);
    assert_eq!(f.target.events(), events);
    assert_eq!(f.playground.state(), PlaygroundState::Editing);
}

#[test]
fn test_default_template_loaded_at_build() {
    let runtime = RecordingRuntime::new();
    let playground = Playground::builder().runtime(runtime.clone()).build();

    assert_eq!(playground.selected_template(), Some("card"));
    assert_eq!(playground.render_count(), 1);
    assert_eq!(playground.target().generation(), 1);
    assert_eq!(runtime.runs(), 1);
}

#[test]
fn test_unknown_default_template_is_ignored() {
    let config = PlaygroundConfig::default().with_default_template(Some("missing"));
    let playground = Playground::builder()
        .config(config)
        .runtime(RecordingRuntime::new())
        .build();

    assert_eq!(playground.selected_template(), None);
    assert_eq!(playground.render_count(), 0);
    assert!(playground.target().is_empty());
}

#[test]
fn test_templates_dir_extends_builtins() {
    let dir = tempfile::TempDir::new().unwrap();
    let gallery = dir.path().join("gallery");
    std::fs::create_dir_all(&gallery).unwrap();
    std::fs::write(gallery.join("index.html"), "<div class=\"gallery\"></div>").unwrap();
    std::fs::write(gallery.join("script.js"), "console.log('gallery');").unwrap();

    let config = quiet_config().with_templates_dir(dir.path());
    let mut playground = Playground::builder()
        .config(config)
        .runtime(RecordingRuntime::new())
        .build();

    assert!(playground.templates().contains("card"));
    assert!(playground.load_template("gallery"));
    assert_eq!(
        playground.buffer(FragmentKind::Structure).text(),
        "<div class=\"gallery\"></div>"
    );
}

#[test]
fn test_missing_templates_dir_falls_back_to_builtins() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = quiet_config().with_templates_dir(dir.path().join("absent"));
    let playground = Playground::builder()
        .config(config)
        .runtime(RecordingRuntime::new())
        .build();

    assert_eq!(
        playground.templates().len(),
        TemplateRegistry::with_builtins().len()
    );
}

// ============================================================================
// Containment and isolation (real sandbox)
// ============================================================================

#[test]
fn test_behavior_error_is_contained_and_visible() {
    let mut playground = sandboxed();
    playground.set_buffer(FragmentKind::Structure, "<h1>Title</h1>");
    playground.set_buffer(FragmentKind::Behavior, "undefinedFunction();");

    let document = playground.render();
    let error = document.error().expect("failure reported");
    assert_eq!(error.name, "ReferenceError");

    let html = document.html().to_owned();
    assert!(html.contains("id=\"folio-error\""));
    assert!(html.contains("undefinedFunction"));
    assert!(html.contains("<h1>Title</h1>"));

    assert_eq!(playground.state(), PlaygroundState::Idle);
    assert_eq!(playground.target().html(), html);
}

#[test]
fn test_syntax_error_is_contained() {
    let mut playground = sandboxed();
    playground.set_buffer(FragmentKind::Behavior, "function (");

    let document = playground.render();
    assert_eq!(document.error().map(|e| e.name.as_str()), Some("SyntaxError"));
}

#[test]
fn test_globals_do_not_leak_between_renders() {
    let mut playground = sandboxed();
    playground.set_buffer(
        FragmentKind::Behavior,
        "window.__x = (window.__x || 0) + 1; console.log(window.__x);",
    );

    for _ in 0..2 {
        let document = playground.render();
        let report = document.outcome().as_ref().expect("runs cleanly");
        assert_eq!(report.console_text(), "1");
    }
}

#[test]
fn test_builtin_templates_render_cleanly() {
    let mut playground = sandboxed();
    for name in ["card", "calculator", "todo", "clock"] {
        assert!(playground.load_template(name));
        let outcome = playground.last_outcome().expect("rendered");
        assert!(outcome.is_ok(), "{name}: {outcome:?}");
    }
}

#[test]
fn test_runtime_failure_from_fake_is_reported() {
    let failure = ExecutionError::new("TypeError", "boom");
    let mut f = fixture_with(quiet_config(), RecordingRuntime::failing(failure.clone()));
    f.playground.set_buffer(FragmentKind::Behavior, "anything");

    let document = f.playground.render();
    assert_eq!(document.error(), Some(&failure));
    assert!(f
        .target
        .current_html()
        .unwrap()
        .contains("<strong>Error:</strong> TypeError: boom"));
}

#[test]
fn test_target_failure_does_not_escape_render() {
    let mut playground = Playground::builder()
        .config(quiet_config())
        .runtime(RecordingRuntime::new())
        .target(FailingTarget)
        .build();
    playground.set_buffer(FragmentKind::Structure, "<p>");

    let sequence = playground.render().sequence();
    assert_eq!(sequence, 1);
    assert_eq!(playground.render_count(), 1);
    assert_eq!(playground.state(), PlaygroundState::Idle);

    playground.reset();
    assert_eq!(playground.state(), PlaygroundState::Idle);
}

#[test]
fn test_closing_tags_cannot_escape_containers() {
    let mut f = fixture();
    f.playground
        .set_buffer(FragmentKind::Presentation, "p{}</style><script>alert(1)</script>");
    f.playground.set_buffer(
        FragmentKind::Behavior,
        "var s = '</script><script>alert(2)</script>';",
    );

    let html = f.playground.render().html().to_owned();
    assert_eq!(html.matches("</style>").count(), 1);
    assert_eq!(html.matches("</script>").count(), 1);
}

#[test]
fn test_sequence_numbers_increase() {
    let mut f = fixture();
    let first = f.playground.render().sequence();
    let second = f.playground.render().sequence();
    assert!(second > first);
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_clears_everything() {
    let mut f = fixture();
    f.playground.load_template("clock");
    f.playground.set_buffer(FragmentKind::Behavior, "pending");

    f.playground.reset();

    assert!(f.playground.buffers().is_empty());
    assert_eq!(f.playground.selected_template(), None);
    assert_eq!(f.playground.state(), PlaygroundState::Idle);
    assert!(!f.playground.has_pending_render());
    assert!(f.playground.last_outcome().is_none());
    assert_eq!(f.target.current_html(), None);
    assert_eq!(f.target.events().last(), Some(&TargetEvent::Cleared));

    f.clock.advance_ms(5000);
    assert!(f.playground.poll().is_none());
}

#[test]
fn test_reset_is_idempotent() {
    let mut playground = Playground::builder()
        .runtime(RecordingRuntime::new())
        .build();
    playground.set_buffer(FragmentKind::Structure, "<p>");

    playground.reset();
    let buffers = playground.buffers().clone();
    let state = playground.state();
    let generation = playground.target().generation();

    playground.reset();
    assert_eq!(playground.buffers(), &buffers);
    assert_eq!(playground.state(), state);
    assert_eq!(playground.selected_template(), None);
    assert!(playground.target().is_empty());
    assert_eq!(playground.target().generation(), generation);
}
