//! # Classbook CLI
//!
//! Administrative operations the HTTP API deliberately does not expose:
//! registering users, creating classes, assigning teachers and minting
//! development tokens, plus fake-data seeding.
//!
//! ## Usage
//!
//! ```ignore
//! use classbook_cli::admin;
//! use classbook_cli::seeder::{seed_all, SeedConfig};
//!
//! let class = admin::create_class(&pool, "Grade 5 Blue").await?;
//! admin::assign_teacher(&pool, "teacher@example.com", class.id).await?;
//! seed_all(&pool, SeedConfig::new(10)).await?;
//! ```

pub mod admin;
pub mod seeder;
