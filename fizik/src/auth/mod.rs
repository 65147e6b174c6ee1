//! Authentication.
//!
//! Users register and log in with a username and password; both return a
//! signed JWT that clients send back as `Authorization: Bearer <token>`.
//! Tokens are verified statelessly (signature and expiry), so logging out is
//! a client-side discard and a token stays valid until it expires.
//!
//! # Modules
//!
//! - [`current_user`]: the [`CurrentUser`](crate::api::models::users::CurrentUser) extractor for handlers
//! - [`password`]: Argon2id hashing and verification
//! - [`service`]: register, login, verify and change-password operations
//! - [`session`]: JWT creation and verification
//!
//! # Usage in Handlers
//!
//! ```ignore
//! use fizik::api::models::users::CurrentUser;
//!
//! async fn protected_handler(current_user: CurrentUser) -> String {
//!     format!("Hello, {}!", current_user.username)
//! }
//! ```

pub mod current_user;
pub mod password;
pub mod service;
pub mod session;
