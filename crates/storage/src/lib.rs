#![forbid(unsafe_code)]

pub mod local_store;
pub mod repository;
pub mod sqlite;

pub use local_store::{FileLocalStore, InMemoryLocalStore, LocalStore};
pub use repository::{
    CatalogRepository, InMemoryRepository, ProfileRepository, Storage, StorageError,
};
