//! # Classbook Models
//!
//! Domain entities, request DTOs and response bodies shared by the API
//! server and the admin CLI.
//!
//! - [`ids`]: typed `Uuid` wrappers per entity
//! - [`users`]: users referenced by memberships and results
//! - [`classes`]: classes and class detail responses
//! - [`memberships`]: teacher and student memberships
//! - [`subjects`]: subjects taught within a class
//! - [`exams`]: exams defined per class and subject
//! - [`results`]: published exam results

pub mod classes;
pub mod exams;
pub mod ids;
pub mod memberships;
pub mod results;
pub mod subjects;
pub mod users;

pub use ids::*;
