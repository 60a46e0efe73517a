//! Typed access to the five catalog routes.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{ClientError, ClientSettings};

/// A book as served by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub language: String,
}

/// One editable text field of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Genre,
    Language,
}

/// The four text fields a screen edits and submits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub language: String,
}

impl BookForm {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.title = value,
            Field::Author => self.author = value,
            Field::Genre => self.genre = value,
            Field::Language => self.language = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Genre => &self.genre,
            Field::Language => &self.language,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            language: book.language.clone(),
        }
    }
}

/// Body of a successful create. Older services answer with the message
/// only, hence the optional id.
#[derive(Debug, Clone, Deserialize)]
pub struct Created {
    pub message: String,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Message {
    message: String,
}

/// The catalog operations the screens depend on.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>, ClientError>;

    async fn get_book(&self, id: &str) -> Result<Book, ClientError>;

    async fn create_book(&self, form: &BookForm) -> Result<Created, ClientError>;

    /// Returns the service's acknowledgement message.
    async fn update_book(&self, id: &str, form: &BookForm) -> Result<String, ClientError>;

    /// Returns the service's acknowledgement text.
    async fn delete_book(&self, id: &str) -> Result<String, ClientError>;
}

/// Shared handle the views hold.
pub type Api = Arc<dyn CatalogApi>;

/// HTTP implementation of [`CatalogApi`].
///
/// No request timeout is set: a request that never answers keeps the
/// calling view waiting.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    books_url: Url,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let books_url = Url::parse(&settings.books_url).map_err(|e| {
            ClientError::Config(format!("invalid books url '{}': {e}", settings.books_url))
        })?;
        if books_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "books url '{}' cannot carry a path",
                settings.books_url
            )));
        }

        let http = reqwest::Client::builder().build()?;

        Ok(Self { books_url, http })
    }

    pub fn books_url(&self) -> &str {
        self.books_url.as_str()
    }

    /// The books url with `id` appended as one percent-encoded segment.
    fn book_url(&self, id: &str) -> Url {
        let mut url = self.books_url.clone();
        // `new` rejects urls that cannot be a base.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(id);
        }
        url
    }

    async fn expect_success(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status { status, body })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let bytes = Self::expect_success(response).await?.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    #[tracing::instrument(skip(self))]
    async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        let response = self.http.get(self.books_url.clone()).send().await?;
        Self::read_json(response).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_book(&self, id: &str) -> Result<Book, ClientError> {
        let response = self.http.get(self.book_url(id)).send().await?;
        Self::read_json(response).await
    }

    #[tracing::instrument(skip_all)]
    async fn create_book(&self, form: &BookForm) -> Result<Created, ClientError> {
        let response = self.http.post(self.books_url.clone()).json(form).send().await?;
        Self::read_json(response).await
    }

    #[tracing::instrument(skip(self, form))]
    async fn update_book(&self, id: &str, form: &BookForm) -> Result<String, ClientError> {
        let response = self.http.put(self.book_url(id)).json(form).send().await?;
        let Message { message } = Self::read_json(response).await?;
        Ok(message)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_book(&self, id: &str) -> Result<String, ClientError> {
        let response = self.http.delete(self.book_url(id)).send().await?;
        Ok(Self::expect_success(response).await?.text().await?)
    }
}
