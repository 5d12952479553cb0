//! # Classbook Core
//!
//! Core error types for the Classbook API.
//!
//! - [`errors::AppError`]: the HTTP-facing error returned by every handler
//! - [`errors::DomainError`]: the typed failures of the classroom workflow
//!   (missing records, role check failures, validation, duplicates)
//!
//! # Example
//!
//! ```ignore
//! use classbook_core::{AppError, DomainError};
//!
//! fn lookup() -> Result<(), DomainError> {
//!     Err(DomainError::not_found("Class"))
//! }
//!
//! let err: AppError = lookup().unwrap_err().into();
//! assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
//! ```

pub mod errors;

pub use errors::{AppError, DomainError};
