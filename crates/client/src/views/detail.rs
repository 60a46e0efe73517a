use crate::{
    navigation::{Acknowledgement, Route},
    views::Notice,
    Api, BookForm, ClientError, Field, ViewError,
};

const FETCH_FAILED: &str = "Failed to fetch book details.";
const UPDATE_FAILED: &str = "Failed to update book.";
const DELETE_FAILED: &str = "Failed to delete book.";
const UPDATED: &str = "Book updated successfully";
const DELETED: &str = "Book deleted successfully";

/// The detail/edit screen for one book.
///
/// The form is seeded once on mount. If that fetch fails the form stays
/// empty and nothing can be submitted until the screen is mounted again.
pub struct DetailView {
    api: Api,
    id: String,
    form: Option<BookForm>,
    notice: Option<Notice>,
    delete_prompt: bool,
    acknowledged: Option<Acknowledgement>,
}

impl DetailView {
    pub fn new(api: Api, id: impl Into<String>) -> Self {
        Self {
            api,
            id: id.into(),
            form: None,
            notice: None,
            delete_prompt: false,
            acknowledged: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The seeded form, `None` until a successful mount.
    pub fn form(&self) -> Option<&BookForm> {
        self.form.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn delete_prompt_open(&self) -> bool {
        self.delete_prompt
    }

    pub fn acknowledged(&self) -> Option<&Acknowledgement> {
        self.acknowledged.as_ref()
    }

    pub async fn mount(&mut self) {
        match self.api.get_book(&self.id).await {
            Ok(book) => self.form = Some(BookForm::from(&book)),
            Err(e) => {
                tracing::error!(error = %e, id = %self.id, "Error fetching book");
                self.notice = Some(Notice::Error(FETCH_FAILED.to_string()));
            }
        }
    }

    /// Edit one field. Ignored until the form is seeded.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        if let Some(form) = self.form.as_mut() {
            form.set(field, value);
        }
    }

    fn ready(&self) -> Result<&BookForm, ViewError> {
        if self.acknowledged.is_some() {
            return Err(ViewError::AlreadyAcknowledged);
        }
        self.form.as_ref().ok_or(ViewError::NotLoaded)
    }

    fn fail(&mut self, message: &'static str, source: ClientError) -> ViewError {
        tracing::error!(error = %source, id = %self.id, "{message}");
        self.notice = Some(Notice::Error(message.to_string()));
        ViewError::Failed { message, source }
    }

    fn acknowledge(&mut self, message: &str) -> &Acknowledgement {
        self.notice = Some(Notice::Success(message.to_string()));
        self.acknowledged
            .insert(Acknowledgement::new(message, Route::Back))
    }

    /// Send all four fields, changed or not.
    pub async fn submit_update(&mut self) -> Result<&Acknowledgement, ViewError> {
        let form = self.ready()?.clone();

        match self.api.update_book(&self.id, &form).await {
            Ok(_) => Ok(self.acknowledge(UPDATED)),
            Err(e) => Err(self.fail(UPDATE_FAILED, e)),
        }
    }

    pub fn request_delete(&mut self) {
        self.delete_prompt = true;
    }

    pub fn cancel_delete(&mut self) {
        self.delete_prompt = false;
    }

    pub async fn confirm_delete(&mut self) -> Result<&Acknowledgement, ViewError> {
        if self.acknowledged.is_some() {
            return Err(ViewError::AlreadyAcknowledged);
        }
        if !self.delete_prompt {
            return Err(ViewError::NothingToConfirm);
        }
        self.delete_prompt = false;

        match self.api.delete_book(&self.id).await {
            Ok(_) => Ok(self.acknowledge(DELETED)),
            Err(e) => Err(self.fail(DELETE_FAILED, e)),
        }
    }
}
