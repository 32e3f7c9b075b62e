use std::io;

use crossterm::event::{self, Event, KeyEventKind};

use crate::event::TuiEvent;

/// Source of terminal events.
pub trait EventSource {
    /// Blocks until the next event is available.
    fn read(&mut self) -> io::Result<Event>;
}

/// Reads events from the real terminal through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Interleaves input events with redraw requests.
///
/// The first call always yields [`TuiEvent::Redraw`]. After that, every
/// input event that can change the application state is followed by one
/// redraw. Key releases are passed through without scheduling a redraw.
#[derive(Debug)]
pub(super) struct EventLoop<S> {
    source: S,
    needs_redraw: bool,
}

impl<S> EventLoop<S>
where
    S: EventSource,
{
    pub(super) fn new(source: S) -> Self {
        Self {
            source,
            needs_redraw: true,
        }
    }

    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        if self.needs_redraw {
            self.needs_redraw = false;
            return Ok(TuiEvent::Redraw);
        }
        let event = self.source.read()?;
        self.needs_redraw = !is_key_release(&event);
        Ok(event.into())
    }
}

fn is_key_release(event: &Event) -> bool {
    event
        .as_key_event()
        .is_some_and(|key| key.kind == KeyEventKind::Release)
}
