//! # CSV Storage
//!
//! File-based storage: one CSV file per table and a YAML file for
//! preferences, all under a single data directory.
//!
//! ```text
//! data/
//! ├── press_releases.csv
//! ├── commando_contents.csv
//! ├── media_plans.csv
//! └── preferences.yaml
//! ```

pub mod connection;
pub mod item_repository;
pub mod preference_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use item_repository::ItemRepository;
pub use preference_repository::PreferenceRepository;
