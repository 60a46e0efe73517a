//! Client side of the book catalog: a typed HTTP client for the `/books`
//! routes and the view state behind the list, detail, create and single
//! screens.

mod api;
mod config;
mod error;
pub mod navigation;
pub mod views;

#[cfg(test)]
mod testing;

pub use api::{Api, Book, BookForm, CatalogApi, CatalogClient, Created, Field};
pub use config::{ClientSettings, Platform};
pub use error::{ClientError, ViewError};
pub use navigation::{Acknowledgement, DelayedNavigation, Route, ACKNOWLEDGE_DELAY};
pub use views::{CreateView, DetailView, ListView, Notice, SingleState, SingleView};
