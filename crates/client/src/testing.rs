//! In-memory [`CatalogApi`] for view tests.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{Book, BookForm, CatalogApi, ClientError, Created};

#[derive(Default)]
pub struct FakeCatalog {
    books: Mutex<Vec<Book>>,
    next_id: Mutex<u32>,
    failing: Mutex<bool>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_books(titles: &[&str]) -> Self {
        let fake = Self::default();
        for title in titles {
            fake.add(title);
        }
        fake
    }

    pub fn add(&self, title: &str) -> String {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = format!("b{}", *next_id);
        self.books.lock().unwrap().push(Book {
            id: id.clone(),
            title: title.to_string(),
            author: "author".to_string(),
            genre: "genre".to_string(),
            language: "English".to_string(),
        });
        id
    }

    pub fn fail(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn books(&self) -> Vec<Book> {
        self.books.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, call: String) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        if *self.failing.lock().unwrap() {
            return Err(ClientError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: r#"{"error":"store down"}"#.to_string(),
            });
        }
        Ok(())
    }

    fn not_found() -> ClientError {
        ClientError::Status {
            status: StatusCode::NOT_FOUND,
            body: r#"{"error":"Book not found"}"#.to_string(),
        }
    }

    fn missing_fields() -> ClientError {
        ClientError::Status {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"error":"Missing required fields"}"#.to_string(),
        }
    }

    fn complete(form: &BookForm) -> bool {
        [&form.title, &form.author, &form.genre, &form.language]
            .iter()
            .all(|value| !value.is_empty())
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        self.enter("list".to_string())?;
        Ok(self.books())
    }

    async fn get_book(&self, id: &str) -> Result<Book, ClientError> {
        self.enter(format!("get {id}"))?;
        self.books()
            .into_iter()
            .find(|book| book.id == id)
            .ok_or_else(Self::not_found)
    }

    async fn create_book(&self, form: &BookForm) -> Result<Created, ClientError> {
        self.enter("create".to_string())?;
        if !Self::complete(form) {
            return Err(Self::missing_fields());
        }
        let id = self.add(&form.title);
        let mut books = self.books.lock().unwrap();
        if let Some(book) = books.iter_mut().find(|book| book.id == id) {
            book.author = form.author.clone();
            book.genre = form.genre.clone();
            book.language = form.language.clone();
        }
        Ok(Created {
            message: "Book added successfully".to_string(),
            id: Some(id),
        })
    }

    async fn update_book(&self, id: &str, form: &BookForm) -> Result<String, ClientError> {
        self.enter(format!("update {id}"))?;
        if !Self::complete(form) {
            return Err(Self::missing_fields());
        }
        let mut books = self.books.lock().unwrap();
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(Self::not_found)?;
        book.title = form.title.clone();
        book.author = form.author.clone();
        book.genre = form.genre.clone();
        book.language = form.language.clone();
        Ok("Book updated successfully".to_string())
    }

    async fn delete_book(&self, id: &str) -> Result<String, ClientError> {
        self.enter(format!("delete {id}"))?;
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|book| book.id != id);
        if books.len() == before {
            return Err(Self::not_found());
        }
        Ok("Book deleted successfully".to_string())
    }
}
