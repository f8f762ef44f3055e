//! `memadmin-validation` — pure form validation.
//!
//! These rules MUST match the backend validation exactly. This is a contract
//! duplication point, not a source of truth: the backend re-validates every
//! submission and wins any disagreement (e.g. duplicate-email detection is
//! necessarily server-side).
//!
//! No I/O, no state: every validator is a pure function over its input.

pub mod field;
pub mod member;
pub mod rules;

pub use field::{Field, validate_field};
pub use member::{MemberValidation, validate_member};
pub use rules::{
    FieldError, FieldResult, validate_email, validate_name, validate_password, validate_phone,
};
