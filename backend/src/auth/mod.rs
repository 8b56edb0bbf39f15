//! Account management and bearer-token resolution.
//!
//! - [`provider`]: the [`IdentityProvider`] capability trait
//! - [`local`]: in-memory implementation with salted SHA-256 hashes
//! - [`password`]: hashing helpers
//! - [`error`]: [`IdentityError`]

pub mod error;
pub mod local;
pub mod password;
pub mod provider;

pub use error::{IdentityError, IdentityResult};
pub use local::LocalIdentityProvider;
pub use provider::IdentityProvider;
