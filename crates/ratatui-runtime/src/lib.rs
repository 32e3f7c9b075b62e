//! Minimal render-on-change runtime for ratatui applications.
//!
//! The runtime blocks on terminal input and redraws only after an event has
//! been handled. Applications either implement [`App`] directly or stack
//! [`Screen`]s in a [`ScreenStack`].

pub use self::{
    app::App,
    event_loop::{EventSource, TerminalEvents},
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod event;
mod event_loop;
mod runtime;
mod screen;
