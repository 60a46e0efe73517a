use crate::{navigation::Route, Api, Book};

pub const NO_BOOK: &str = "No book found!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleState {
    Loading,
    Loaded(Book),
    /// The fetch failed for any reason.
    Missing,
}

/// Read-only screen for one book.
pub struct SingleView {
    api: Api,
    id: String,
    state: SingleState,
}

impl SingleView {
    pub fn new(api: Api, id: impl Into<String>) -> Self {
        Self {
            api,
            id: id.into(),
            state: SingleState::Loading,
        }
    }

    pub fn state(&self) -> &SingleState {
        &self.state
    }

    pub fn book(&self) -> Option<&Book> {
        match &self.state {
            SingleState::Loaded(book) => Some(book),
            _ => None,
        }
    }

    pub async fn mount(&mut self) {
        self.state = match self.api.get_book(&self.id).await {
            Ok(book) => SingleState::Loaded(book),
            Err(e) => {
                tracing::error!(error = %e, id = %self.id, "Error fetching book");
                SingleState::Missing
            }
        };
    }

    pub fn go_back(&self) -> Route {
        Route::Back
    }
}
