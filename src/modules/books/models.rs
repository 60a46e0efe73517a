use catalog_db::{Document, Fields, StoreError};
use catalog_http::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::{Validate, ValidationErrors};

pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const MISSING_FIELDS: &str = "Missing required fields";
pub const BOOK_ADDED: &str = "Book added successfully";
pub const BOOK_UPDATED: &str = "Book updated successfully";
pub const BOOK_DELETED: &str = "Book deleted successfully";

/// A book as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub language: String,
}

impl Book {
    /// Project a stored document onto a book.
    pub fn from_document(document: Document) -> Result<Self, StoreError> {
        let fields: BookFields = document.decode()?;

        Ok(Self {
            id: document.id,
            title: fields.title,
            author: fields.author,
            genre: fields.genre,
            language: fields.language,
        })
    }
}

/// The four text fields of a book, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub language: String,
}

impl BookFields {
    pub fn into_store_fields(self) -> Fields {
        Fields::from_iter([
            ("title".to_string(), Value::String(self.title)),
            ("author".to_string(), Value::String(self.author)),
            ("genre".to_string(), Value::String(self.genre)),
            ("language".to_string(), Value::String(self.language)),
        ])
    }
}

/// Request body for create and update. Every field must be present and
/// non-empty; nothing else is checked.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookPayload {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub author: Option<String>,
    #[validate(required, length(min = 1))]
    pub genre: Option<String>,
    #[validate(required, length(min = 1))]
    pub language: Option<String>,
}

impl BookPayload {
    pub fn into_fields(self) -> Result<BookFields, AppError> {
        self.validate().map_err(|errors| missing_fields(&errors))?;

        match (self.title, self.author, self.genre, self.language) {
            (Some(title), Some(author), Some(genre), Some(language)) => Ok(BookFields {
                title,
                author,
                genre,
                language,
            }),
            _ => Err(AppError::validation(Vec::new(), MISSING_FIELDS)),
        }
    }
}

fn missing_fields(errors: &ValidationErrors) -> AppError {
    let mut details: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let code = errs
                .first()
                .map(|e| e.code.to_string())
                .unwrap_or_else(|| "invalid".to_string());
            (field.to_string(), code)
        })
        .collect();
    details.sort();

    AppError::validation(
        details
            .into_iter()
            .map(|(field, code)| json!({ "field": field, "error": code }))
            .collect(),
        MISSING_FIELDS,
    )
}

/// `{"message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response to a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, author: &str, genre: &str, language: &str) -> BookPayload {
        BookPayload {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            genre: Some(genre.to_string()),
            language: Some(language.to_string()),
        }
    }

    #[test]
    fn complete_payload_is_accepted() {
        let fields = payload("Dune", "Herbert", "SciFi", "English")
            .into_fields()
            .unwrap();
        assert_eq!(fields.title, "Dune");
        assert_eq!(fields.language, "English");
    }

    #[test]
    fn missing_field_is_rejected() {
        let mut incomplete = payload("Dune", "Herbert", "SciFi", "English");
        incomplete.genre = None;

        match incomplete.into_fields().unwrap_err() {
            AppError::Validation { details, message } => {
                assert_eq!(message, MISSING_FIELDS);
                assert_eq!(details, vec![json!({"field": "genre", "error": "required"})]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_field_is_rejected() {
        let err = payload("Dune", "", "SciFi", "English")
            .into_fields()
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        assert!(payload(" ", "Herbert", "SciFi", "English")
            .into_fields()
            .is_ok());
    }

    #[test]
    fn book_from_document() {
        let fields = BookFields {
            title: "Dune".into(),
            author: "Herbert".into(),
            genre: "SciFi".into(),
            language: "English".into(),
        };
        let document = Document::new("abc", fields.clone().into_store_fields());

        let book = Book::from_document(document).unwrap();
        assert_eq!(book.id, "abc");
        assert_eq!(book.author, "Herbert");
    }

    #[test]
    fn partial_document_is_malformed() {
        let document = Document::new(
            "abc",
            json!({"title": "Dune"}).as_object().cloned().unwrap(),
        );
        assert!(matches!(
            Book::from_document(document),
            Err(StoreError::Malformed { .. })
        ));
    }
}
