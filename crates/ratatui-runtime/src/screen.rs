use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use crate::App;

/// One full-screen view of an application.
///
/// Screens live in a [`ScreenStack`]; only the top screen receives events
/// and is drawn.
///
/// ```text
/// push ──> on_enter ──> (top) ──> push child ──> on_leave ─┐
///                         ^                                 │
///                         └──── child popped ── on_enter <──┘
/// pop / exit ──> on_leave ──> dropped
/// ```
pub trait Screen: fmt::Debug {
    /// Called each time this screen becomes the top of the stack.
    fn on_enter(&mut self) {}

    /// Called each time this screen stops being the top of the stack.
    fn on_leave(&mut self) {}

    /// Handles an event and decides what happens to the stack.
    fn handle_event(&mut self, event: &Event) -> ScreenTransition;

    fn draw(&mut self, frame: &mut Frame);
}

/// Stack change requested by a screen.
#[derive(Debug)]
pub enum ScreenTransition {
    /// Keep the current screen.
    Stay,
    /// Show a new screen on top of the current one.
    Push(Box<dyn Screen>),
    /// Close the current screen and return to the one below.
    ///
    /// Popping the last screen ends the application.
    Pop,
    /// Close every screen and end the application.
    Exit,
}

/// Stack of screens, usable as an [`App`].
#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
}

impl ScreenStack {
    /// Creates a stack whose only screen is `initial`.
    #[must_use]
    pub fn new(mut initial: Box<dyn Screen>) -> Self {
        initial.on_enter();
        Self {
            screens: vec![initial],
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    fn apply(&mut self, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                if let Some(current) = self.screens.last_mut() {
                    current.on_leave();
                }
                screen.on_enter();
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                if let Some(mut closed) = self.screens.pop() {
                    closed.on_leave();
                }
                if let Some(previous) = self.screens.last_mut() {
                    previous.on_enter();
                }
            }
            ScreenTransition::Exit => {
                while let Some(mut closed) = self.screens.pop() {
                    closed.on_leave();
                }
            }
        }
    }
}

impl App for ScreenStack {
    fn should_exit(&self) -> bool {
        self.screens.is_empty()
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(event);
            self.apply(transition);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        if let Some(current) = self.screens.last_mut() {
            current.draw(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Journal(Rc<RefCell<Vec<String>>>);

    impl Journal {
        fn record(&self, entry: String) {
            self.0.borrow_mut().push(entry);
        }

        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.borrow_mut())
        }
    }

    /// Replies to events with a scripted sequence of transitions.
    #[derive(Debug)]
    struct ScriptedScreen {
        name: &'static str,
        journal: Journal,
        replies: Vec<ScreenTransition>,
    }

    impl ScriptedScreen {
        fn boxed(
            name: &'static str,
            journal: &Journal,
            mut replies: Vec<ScreenTransition>,
        ) -> Box<dyn Screen> {
            replies.reverse();
            Box::new(Self {
                name,
                journal: journal.clone(),
                replies,
            })
        }
    }

    impl Screen for ScriptedScreen {
        fn on_enter(&mut self) {
            self.journal.record(format!("{} enter", self.name));
        }

        fn on_leave(&mut self) {
            self.journal.record(format!("{} leave", self.name));
        }

        fn handle_event(&mut self, _event: &Event) -> ScreenTransition {
            self.journal.record(format!("{} event", self.name));
            self.replies.pop().unwrap_or(ScreenTransition::Stay)
        }

        fn draw(&mut self, _frame: &mut Frame) {}
    }

    fn any_key() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    #[test]
    fn test_new_enters_initial_screen() {
        let journal = Journal::default();
        let stack = ScreenStack::new(ScriptedScreen::boxed("main", &journal, vec![]));
        assert_eq!(journal.take(), ["main enter"]);
        assert_eq!(stack.depth(), 1);
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_push_and_pop() {
        let journal = Journal::default();
        let child = ScriptedScreen::boxed("table", &journal, vec![ScreenTransition::Pop]);
        let mut stack = ScreenStack::new(ScriptedScreen::boxed(
            "main",
            &journal,
            vec![ScreenTransition::Push(child)],
        ));
        journal.take();

        stack.handle_event(&any_key());
        assert_eq!(journal.take(), ["main event", "main leave", "table enter"]);
        assert_eq!(stack.depth(), 2);

        stack.handle_event(&any_key());
        assert_eq!(journal.take(), ["table event", "table leave", "main enter"]);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_stay_keeps_stack() {
        let journal = Journal::default();
        let mut stack = ScreenStack::new(ScriptedScreen::boxed("main", &journal, vec![]));
        journal.take();
        stack.handle_event(&any_key());
        assert_eq!(journal.take(), ["main event"]);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_popping_last_screen_exits() {
        let journal = Journal::default();
        let mut stack = ScreenStack::new(ScriptedScreen::boxed(
            "main",
            &journal,
            vec![ScreenTransition::Pop],
        ));
        stack.handle_event(&any_key());
        assert!(stack.should_exit());
    }

    #[test]
    fn test_exit_leaves_every_screen() {
        let journal = Journal::default();
        let child = ScriptedScreen::boxed("table", &journal, vec![ScreenTransition::Exit]);
        let mut stack = ScreenStack::new(ScriptedScreen::boxed(
            "main",
            &journal,
            vec![ScreenTransition::Push(child)],
        ));
        stack.handle_event(&any_key());
        journal.take();

        stack.handle_event(&any_key());
        assert_eq!(journal.take(), ["table event", "table leave", "main leave"]);
        assert!(stack.should_exit());

        stack.handle_event(&any_key());
        assert!(journal.take().is_empty());
    }
}
