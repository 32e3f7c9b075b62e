use std::io;

use crate::{
    App, EventSource, TerminalEvents,
    event::TuiEvent,
    event_loop::EventLoop,
};

/// Runs an [`App`] in the terminal until it asks to exit.
#[derive(Debug)]
pub struct Runtime<S = TerminalEvents> {
    events: EventLoop<S>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(TerminalEvents)
    }
}

impl<S> Runtime<S>
where
    S: EventSource,
{
    /// Creates a runtime reading events from `source` instead of the terminal.
    pub fn with_source(source: S) -> Self {
        Self {
            events: EventLoop::new(source),
        }
    }

    /// Enters the alternate screen and runs the event loop.
    ///
    /// The terminal is restored when the loop ends, including on error.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Redraw => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Input(event) => app.handle_event(&event),
                }
            }
            Ok(())
        })
    }
}
