use crossterm::event::Event;
use ratatui::Frame;

/// Application driven by [`Runtime::run`](crate::Runtime::run).
pub trait App {
    /// Returns whether the event loop should stop.
    fn should_exit(&self) -> bool;

    /// Handles one terminal event (key input, resize, ...).
    fn handle_event(&mut self, event: &Event);

    /// Draws the whole screen.
    ///
    /// Takes `&mut self` so that stateful widgets (lists, tables) can keep
    /// their scroll offset between frames.
    fn draw(&mut self, frame: &mut Frame);
}
