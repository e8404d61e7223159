//! Authentication module for Adminboard
//!
//! This module provides:
//! - Access token decryption and signature verification
//! - Role-based access predicates for routes and actions

pub mod jwe;
pub mod jwt;
pub mod policy;
#[cfg(test)]
pub(crate) mod testing;

pub use jwe::{EncryptionHeader, JweDecrypter};
pub use jwt::{Claims, TokenCodec, TokenError, UserClaims};
pub use policy::{has_permission, has_route_access};
