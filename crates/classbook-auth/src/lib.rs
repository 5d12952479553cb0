//! # Classbook Auth
//!
//! Identity provider glue for the Classbook API.
//!
//! Tokens are issued by an external identity provider; this crate only
//! verifies them and exposes the subject as the caller's user id. A minting
//! helper exists for the admin CLI and for tests.
//!
//! - [`claims`]: JWT claim structure
//! - [`jwt`]: token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use classbook_auth::{create_access_token, verify_token};
//! use classbook_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "teacher@example.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, user_id.to_string());
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
