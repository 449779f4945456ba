//! Async event loop for a playground
//!
//! Hosts that receive edits asynchronously send [`PlaygroundEvent`]s over a
//! channel; [`drive`] applies them and sleeps until the debounce deadline in
//! between. Build the playground with [`crate::TokioClock`] so deadlines and
//! sleeps share one time source.

use crate::buffer::FragmentKind;
use crate::playground::Playground;
use crate::target::RenderTarget;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

/// Input from a playground host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaygroundEvent {
    /// A fragment input changed
    Edit {
        /// Which fragment
        kind: FragmentKind,
        /// New text
        text: String,
    },
    /// The template selector changed
    LoadTemplate(String),
    /// The run control was pressed
    Run,
    /// The reset control was pressed
    Reset,
}

impl<T: RenderTarget> Playground<T> {
    /// Apply one host event
    pub fn dispatch(&mut self, event: PlaygroundEvent) {
        match event {
            PlaygroundEvent::Edit { kind, text } => self.set_buffer(kind, text),
            PlaygroundEvent::LoadTemplate(name) => {
                self.load_template(&name);
            }
            PlaygroundEvent::Run => {
                self.render();
            }
            PlaygroundEvent::Reset => self.reset(),
        }
    }
}

/// Run `playground` until the event channel closes
///
/// A render still pending when the channel closes is performed before
/// returning, so the last edit is never lost.
pub async fn drive<T: RenderTarget>(
    playground: &mut Playground<T>,
    mut events: mpsc::Receiver<PlaygroundEvent>,
) {
    loop {
        let wake = playground.next_deadline().map(Instant::from_std);

        tokio::select! {
            event = events.recv() => match event {
                Some(event) => playground.dispatch(event),
                None => break,
            },
            () = sleep_until(wake.unwrap_or_else(Instant::now)), if wake.is_some() => {
                playground.poll();
            }
        }
    }

    if playground.has_pending_render() {
        tracing::debug!("event channel closed, flushing pending render");
        playground.render();
    }
}
