//! `memadmin-auth` — token persistence, claim inspection, authorization
//! predicates.
//!
//! This crate is intentionally decoupled from HTTP: it defines *where*
//! tokens live (the injectable [`TokenStore`]) and *what* can be read off
//! them locally, never how they are exchanged.

pub mod claims;
pub mod predicates;
pub mod tokens;

pub use claims::{AccessClaims, ClaimsError, expires_within, peek_claims};
pub use predicates::{has_permission, has_role, is_admin, is_moderator};
pub use tokens::{FileTokenStore, InMemoryTokenStore, TokenPair, TokenStore};
