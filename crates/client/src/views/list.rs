use crate::{navigation::Route, Api, Book};

/// The book list screen.
///
/// Every focus replaces the whole sequence with a fresh List. Deleting goes
/// through a confirmation prompt and is followed by a refetch; rows are never
/// removed locally.
pub struct ListView {
    api: Api,
    books: Vec<Book>,
    pending_delete: Option<String>,
}

impl ListView {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            books: Vec::new(),
            pending_delete: None,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Id awaiting delete confirmation, if the prompt is open.
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Screen gained focus (first visit or returning to it).
    ///
    /// Returns whether the list was refreshed. A failure is logged and the
    /// previous rows stay.
    pub async fn focus(&mut self) -> bool {
        match self.api.list_books().await {
            Ok(books) => {
                tracing::debug!(count = books.len(), "book list refreshed");
                self.books = books;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching books");
                false
            }
        }
    }

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the prompted book, close the prompt and refetch.
    ///
    /// Returns whether the service confirmed the delete. A failed delete is
    /// logged and not followed by a refetch.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };

        match self.api.delete_book(&id).await {
            Ok(_) => {
                self.focus().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, %id, "Error deleting book");
                false
            }
        }
    }

    /// Edit screen for a row.
    pub fn open_detail(&self, id: impl Into<String>) -> Route {
        Route::Detail { id: id.into() }
    }

    /// Read-only screen for a row.
    pub fn open_single(&self, id: impl Into<String>) -> Route {
        Route::Single { id: id.into() }
    }

    pub fn open_create(&self) -> Route {
        Route::Create
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::FakeCatalog;

    fn titles(view: &ListView) -> Vec<&str> {
        view.books().iter().map(|b| b.title.as_str()).collect()
    }

    #[tokio::test]
    async fn focus_replaces_the_sequence() {
        let fake = Arc::new(FakeCatalog::with_books(&["Dune"]));
        let mut view = ListView::new(fake.clone());

        assert!(view.focus().await);
        assert_eq!(titles(&view), vec!["Dune"]);

        fake.add("Kindred");
        view.focus().await;
        assert_eq!(titles(&view), vec!["Dune", "Kindred"]);
    }

    #[tokio::test]
    async fn failed_focus_keeps_previous_rows() {
        let fake = Arc::new(FakeCatalog::with_books(&["Dune"]));
        let mut view = ListView::new(fake.clone());
        view.focus().await;

        fake.fail(true);
        assert!(!view.focus().await);
        assert_eq!(titles(&view), vec!["Dune"]);
    }

    #[tokio::test]
    async fn cancelled_prompt_sends_nothing() {
        let fake = Arc::new(FakeCatalog::with_books(&["Dune"]));
        let mut view = ListView::new(fake.clone());

        view.request_delete("b1");
        assert_eq!(view.pending_delete(), Some("b1"));
        view.cancel_delete();

        assert!(!view.confirm_delete().await);
        assert!(fake.calls().is_empty());
        assert_eq!(fake.books().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_refetches() {
        let fake = Arc::new(FakeCatalog::with_books(&["Dune", "Kindred"]));
        let mut view = ListView::new(fake.clone());
        view.focus().await;

        view.request_delete("b1");
        assert!(view.confirm_delete().await);

        assert_eq!(view.pending_delete(), None);
        assert_eq!(titles(&view), vec!["Kindred"]);
        assert_eq!(fake.calls(), vec!["list", "delete b1", "list"]);
    }

    #[tokio::test]
    async fn failed_delete_keeps_row_and_closes_prompt() {
        let fake = Arc::new(FakeCatalog::with_books(&["Dune"]));
        let mut view = ListView::new(fake.clone());
        view.focus().await;

        view.request_delete("missing");
        assert!(!view.confirm_delete().await);

        assert_eq!(view.pending_delete(), None);
        assert_eq!(titles(&view), vec!["Dune"]);
        assert_eq!(fake.calls(), vec!["list", "delete missing"]);
    }

    #[test]
    fn row_actions_route_to_screens() {
        let view = ListView::new(Arc::new(FakeCatalog::default()));

        assert_eq!(view.open_detail("b1"), Route::Detail { id: "b1".into() });
        assert_eq!(view.open_single("b1"), Route::Single { id: "b1".into() });
        assert_eq!(view.open_create(), Route::Create);
    }
}
