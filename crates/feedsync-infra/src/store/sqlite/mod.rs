//! SQLite-backed local store via SeaORM.

mod connection;
pub mod entity;
mod repository;

pub use connection::SqliteConfig;
pub use repository::SqliteLocalStore;
