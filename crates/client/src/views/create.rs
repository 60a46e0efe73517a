use crate::{
    navigation::{Acknowledgement, Route},
    Api, BookForm, Field, ViewError,
};

const ADDED: &str = "Book added successfully";
const ADD_FAILED: &str = "Failed to add book";

/// The create screen.
///
/// Fields are sent as typed; the service decides what is missing. Any
/// failure raises the same alert.
pub struct CreateView {
    api: Api,
    form: BookForm,
    alert: Option<&'static str>,
    acknowledged: Option<Acknowledgement>,
}

impl CreateView {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            form: BookForm::default(),
            alert: None,
            acknowledged: None,
        }
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Blocking alert raised by the last failed submit.
    pub fn alert(&self) -> Option<&str> {
        self.alert
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn acknowledged(&self) -> Option<&Acknowledgement> {
        self.acknowledged.as_ref()
    }

    pub async fn submit(&mut self) -> Result<&Acknowledgement, ViewError> {
        if self.acknowledged.is_some() {
            return Err(ViewError::AlreadyAcknowledged);
        }

        match self.api.create_book(&self.form).await {
            Ok(created) => {
                tracing::info!(id = ?created.id, "book created");
                self.form.clear();
                self.alert = None;
                Ok(self
                    .acknowledged
                    .insert(Acknowledgement::new(ADDED, Route::List)))
            }
            Err(source) => {
                tracing::error!(error = %source, "Error adding book");
                self.alert = Some(ADD_FAILED);
                Err(ViewError::Failed {
                    message: ADD_FAILED,
                    source,
                })
            }
        }
    }
}
