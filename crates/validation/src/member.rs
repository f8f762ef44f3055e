//! Whole-form validation for member drafts.

use std::collections::BTreeMap;

use memadmin_core::{ClientError, MemberDraft};

use crate::rules::{validate_email, validate_name, validate_phone};

/// Aggregated validation outcome for a member form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberValidation {
    /// Field name → error message, for inline rendering.
    pub errors: BTreeMap<String, String>,
}

impl MemberValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert into the client error that blocks submission.
    pub fn into_error(self) -> ClientError {
        ClientError::FieldErrors(self.errors)
    }
}

/// Validate every field of a member draft.
///
/// Submission is blocked while any field fails; the backend re-validates
/// regardless and may still reject (duplicate email, for one).
pub fn validate_member(draft: &MemberDraft) -> MemberValidation {
    let mut errors = BTreeMap::new();

    if let Err(e) = validate_name(&draft.name) {
        errors.insert("name".to_string(), e.message().to_string());
    }
    if let Err(e) = validate_email(&draft.email) {
        errors.insert("email".to_string(), e.message().to_string());
    }
    if let Err(e) = validate_phone(&draft.phone_number) {
        errors.insert("phoneNumber".to_string(), e.message().to_string());
    }

    MemberValidation { errors }
}
