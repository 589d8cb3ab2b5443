//! # Storage Module
//!
//! Data persistence for the dashboard. The domain layer only sees the
//! traits in [`traits`]; the CSV implementation stands in for the hosted
//! tables and the browser key-value store.

pub mod csv;
pub mod traits;

pub use self::csv::{CsvConnection, ItemRepository, PreferenceRepository};
pub use traits::{ItemStorage, PreferenceStorage, StorageError};
