use crossterm::event::Event;

/// Step produced by the event loop.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// State may have changed since the last frame.
    Redraw,
    /// Input from the terminal.
    Input(Event),
}
