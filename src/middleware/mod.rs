//! Request extractors.
//!
//! - [`auth`]: bearer token authentication
//!
//! Every `/api` handler takes an [`auth::AuthUser`], so a request without a
//! valid `Authorization: Bearer <token>` header is rejected with `401`
//! before any store access. Class-level authorization happens in the
//! services through [`crate::utils::auth_helpers`].

pub mod auth;
