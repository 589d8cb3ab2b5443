//! # IO Module
//!
//! Adapter layer between the web UI and the domain logic.
//!
//! Translates HTTP requests into domain operations and domain results into
//! JSON responses, and maps domain errors to HTTP status codes.
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum, one router per API area
//! - **Serialization**: Serde JSON for DTOs from the `shared` crate, plain
//!   CSV text for import and export
//! - **State Management**: Services injected through Axum state

pub mod rest;

pub use rest::ApiError;
