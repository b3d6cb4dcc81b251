//! Credentials, password hashing, tokens, and identity resolution.
//!
//! JWT-based authentication with Argon2 password hashing. Tokens are
//! stateless and time-bounded; identity resolution always re-checks the
//! credential store, so a token is only as alive as its subject.
//!
//! ## Identity Types
//!
//! - [`Account`] — Registered user with credentials and admin flag
//! - [`Identity`] — Resolved, authenticated actor
//! - [`Admins`] — Seed-admin allow-list applied at registration
//!
//! ## Security
//!
//! - [`Crypto`] — JWT signing and verification
//! - [`Claims`] — JWT payload structure
//! - [`password`] — Argon2 hashing and verification
mod account;
mod admins;
mod claims;
mod crypto;
mod identity;
pub mod password;

pub use account::*;
pub use admins::*;
pub use claims::*;
pub use crypto::*;
pub use identity::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod dto;
#[cfg(feature = "server")]
mod fault;
#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use dto::*;
#[cfg(feature = "server")]
pub use fault::*;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
