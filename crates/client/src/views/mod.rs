//! View state for the four catalog screens.
//!
//! Views own their state and talk to the service through [`crate::Api`].
//! Rendering is left to whatever front end drives them.

mod create;
mod detail;
mod list;
mod single;

pub use create::CreateView;
pub use detail::DetailView;
pub use list::ListView;
pub use single::{SingleState, SingleView, NO_BOOK};

/// Inline message a screen shows after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}
