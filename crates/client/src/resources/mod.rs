//! Typed resource clients.
//!
//! One client per backend resource, all thin: query construction and payload
//! shaping only. Errors pass through to the caller untouched.

pub mod auth;
pub mod common;
pub mod jobs;
pub mod members;
pub mod profile;
pub mod roles;
pub mod sessions;
pub mod users;
