//! Field validation rules.
//!
//! Message strings are part of the contract (forms render them verbatim),
//! so they stay byte-identical to what the backend's own validators emit.

use thiserror::Error;

/// A validation failure with its user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FieldError(&'static str);

impl FieldError {
    pub fn message(&self) -> &'static str {
        self.0
    }
}

/// Result of validating one field.
pub type FieldResult = Result<(), FieldError>;

fn fail(message: &'static str) -> FieldResult {
    Err(FieldError(message))
}

/// Special characters accepted in passwords.
const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Second-level labels that are themselves common TLDs; `x.com.com` is a
/// typo, not a domain.
const COMMON_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "mil", "co", "io", "ai", "app", "dev",
];

/// Validate a member/person name.
///
/// 2–50 characters after trimming; letters, spaces, hyphens, and apostrophes
/// only; no digits.
pub fn validate_name(name: &str) -> FieldResult {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return fail("Name is required");
    }
    if trimmed.chars().count() < 2 {
        return fail("Name must be at least 2 characters");
    }
    if trimmed.chars().count() > 50 {
        return fail("Name must not exceed 50 characters");
    }
    if trimmed.chars().any(|c| c.is_ascii_digit()) {
        return fail("Name must not contain numbers");
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '\'' || c == '-')
    {
        return fail("Name can only contain letters, spaces, hyphens, and apostrophes");
    }

    Ok(())
}

/// Validate an email address.
///
/// Stricter than RFC 5321 on purpose: the domain must have 2–3 dot-separated
/// labels with a 2–7-letter TLD, and a second-level label that is itself a
/// common TLD is rejected (catches `user@example.com.com`).
pub fn validate_email(email: &str) -> FieldResult {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return fail("Email address is required");
    }
    if trimmed.contains(' ') {
        return fail("Email address cannot contain spaces");
    }
    if !trimmed.contains('@') {
        return fail("Email address must contain @ symbol");
    }
    if trimmed.matches('@').count() > 1 {
        return fail("Email address can only contain one @ symbol");
    }

    let Some((local, domain)) = trimmed.split_once('@') else {
        return fail("Email format is invalid (must be like user@example.com)");
    };

    if local.is_empty() {
        return fail("Email address must have a username before @");
    }
    if local.len() > 64 {
        return fail("Email username is too long (max 64 characters)");
    }
    if domain.is_empty() {
        return fail("Email address must have a domain after @");
    }
    if !domain.contains('.') {
        return fail("Email domain must contain at least one dot (e.g., example.com)");
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return fail("Email domain cannot start or end with a dot");
    }
    if domain.len() > 253 {
        return fail("Email domain is too long");
    }
    if trimmed.contains("..") {
        return fail("Email cannot contain consecutive dots");
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return fail("Email domain must have at least two parts (e.g., example.com)");
    }
    if labels.len() > 3 {
        return fail("Email domain has too many parts (max: subdomain.domain.com)");
    }

    let tld = labels[labels.len() - 1];
    let second_level = labels[labels.len() - 2];

    if COMMON_TLDS.contains(&second_level.to_ascii_lowercase().as_str()) {
        return fail("Email domain format is invalid (double extension detected like .com.com)");
    }
    if !(2..=7).contains(&tld.len()) || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return fail("Email domain extension must be 2-7 letters only");
    }
    if !second_level
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return fail("Email domain contains invalid characters");
    }

    // Character-class check over the whole address, after the structural ones.
    let local_ok = local
        .split('.')
        .all(|run| !run.is_empty() && run.chars().all(is_local_char));
    let domain_ok = labels
        .iter()
        .all(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    if !local_ok || !domain_ok {
        return fail("Email format is invalid (must be like user@example.com)");
    }

    Ok(())
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '&' | '*' | '-')
}

/// Validate a phone number (Indian mobile).
///
/// Exactly 10 digits, first digit 6–9, no separators, no country code.
pub fn validate_phone(phone_number: &str) -> FieldResult {
    let trimmed = phone_number.trim();

    if trimmed.is_empty() {
        return fail("Phone number is required");
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return fail(
            "Phone number must contain only digits (no spaces, dashes, or special characters)",
        );
    }
    if trimmed.len() < 10 {
        return fail("Phone number must be exactly 10 digits");
    }
    if trimmed.len() > 10 {
        return fail("Phone number must be exactly 10 digits (do not include +91 country code)");
    }
    if !matches!(trimmed.as_bytes()[0], b'6'..=b'9') {
        return fail("Phone number must start with 6, 7, 8, or 9 (Indian mobile numbers only)");
    }

    Ok(())
}

/// Validate a password.
///
/// At least 8 characters with one uppercase letter, one lowercase letter,
/// one digit, and one special character from the fixed set.
pub fn validate_password(password: &str) -> FieldResult {
    let trimmed = password.trim();

    if trimmed.is_empty() {
        return fail("Password is required");
    }
    if trimmed.chars().count() < 8 {
        return fail("Password must be at least 8 characters long");
    }
    if !trimmed.chars().any(|c| c.is_ascii_uppercase()) {
        return fail("Password must contain at least one uppercase letter (A-Z)");
    }
    if !trimmed.chars().any(|c| c.is_ascii_lowercase()) {
        return fail("Password must contain at least one lowercase letter (a-z)");
    }
    if !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return fail("Password must contain at least one number (0-9)");
    }
    if !trimmed.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return fail("Password must contain at least one special character (!@#$%^&* etc.)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_accepts_professional_names() {
        assert!(validate_name("John Doe").is_ok());
        assert!(validate_name("O'Brien").is_ok());
        assert!(validate_name("Anne-Marie").is_ok());
        assert!(validate_name("  Jo  ").is_ok());
    }

    #[test]
    fn name_rejects_digits_before_charset() {
        let err = validate_name("John2 Doe!").unwrap_err();
        assert_eq!(err.message(), "Name must not contain numbers");
    }

    #[test]
    fn name_enforces_length_after_trim() {
        assert_eq!(
            validate_name(" J ").unwrap_err().message(),
            "Name must be at least 2 characters"
        );
        assert_eq!(
            validate_name(&"a".repeat(51)).unwrap_err().message(),
            "Name must not exceed 50 characters"
        );
        assert_eq!(
            validate_name("   ").unwrap_err().message(),
            "Name is required"
        );
    }

    #[test]
    fn email_accepts_plain_and_subdomain_addresses() {
        assert!(validate_email("john@example.com").is_ok());
        assert!(validate_email("a_b+c@mail.example.org").is_ok());
        assert!(validate_email("x@sub-domain.example.io").is_ok());
    }

    #[test]
    fn email_rejects_structural_defects() {
        assert_eq!(
            validate_email("").unwrap_err().message(),
            "Email address is required"
        );
        assert_eq!(
            validate_email("a b@example.com").unwrap_err().message(),
            "Email address cannot contain spaces"
        );
        assert_eq!(
            validate_email("plainaddress").unwrap_err().message(),
            "Email address must contain @ symbol"
        );
        assert_eq!(
            validate_email("a@@example.com").unwrap_err().message(),
            "Email address can only contain one @ symbol"
        );
        assert_eq!(
            validate_email("@example.com").unwrap_err().message(),
            "Email address must have a username before @"
        );
        assert_eq!(
            validate_email("a@nodot").unwrap_err().message(),
            "Email domain must contain at least one dot (e.g., example.com)"
        );
        assert_eq!(
            validate_email("a@.example.com").unwrap_err().message(),
            "Email domain cannot start or end with a dot"
        );
        assert_eq!(
            validate_email("a..b@example.com").unwrap_err().message(),
            "Email cannot contain consecutive dots"
        );
    }

    #[test]
    fn email_rejects_double_extension() {
        let err = validate_email("user@example.com.com").unwrap_err();
        assert_eq!(
            err.message(),
            "Email domain format is invalid (double extension detected like .com.com)"
        );
    }

    #[test]
    fn email_rejects_too_many_domain_labels() {
        let err = validate_email("user@a.b.example.org").unwrap_err();
        assert_eq!(
            err.message(),
            "Email domain has too many parts (max: subdomain.domain.com)"
        );
    }

    #[test]
    fn email_constrains_tld_shape() {
        assert_eq!(
            validate_email("user@example.c").unwrap_err().message(),
            "Email domain extension must be 2-7 letters only"
        );
        assert_eq!(
            validate_email("user@example.c0m").unwrap_err().message(),
            "Email domain extension must be 2-7 letters only"
        );
    }

    #[test]
    fn email_rejects_local_part_over_64_chars() {
        let long_local = format!("{}@example.com", "a".repeat(65));
        assert_eq!(
            validate_email(&long_local).unwrap_err().message(),
            "Email username is too long (max 64 characters)"
        );
    }

    #[test]
    fn email_rejects_disallowed_local_characters() {
        let err = validate_email("us#er@example.com").unwrap_err();
        assert_eq!(
            err.message(),
            "Email format is invalid (must be like user@example.com)"
        );
    }

    #[test]
    fn phone_accepts_all_valid_prefixes() {
        for prefix in ["6", "7", "8", "9"] {
            let number = format!("{prefix}123456789");
            assert!(validate_phone(&number).is_ok(), "prefix {prefix}");
        }
    }

    #[test]
    fn phone_rejects_bad_prefix_length_and_charset() {
        assert_eq!(
            validate_phone("1234567890").unwrap_err().message(),
            "Phone number must start with 6, 7, 8, or 9 (Indian mobile numbers only)"
        );
        assert_eq!(
            validate_phone("98765432").unwrap_err().message(),
            "Phone number must be exactly 10 digits"
        );
        assert_eq!(
            validate_phone("98765432101").unwrap_err().message(),
            "Phone number must be exactly 10 digits (do not include +91 country code)"
        );
        assert_eq!(
            validate_phone("98765-4321").unwrap_err().message(),
            "Phone number must contain only digits (no spaces, dashes, or special characters)"
        );
        assert_eq!(
            validate_phone("").unwrap_err().message(),
            "Phone number is required"
        );
    }

    #[test]
    fn password_requires_all_four_character_classes() {
        assert!(validate_password("Str0ng!pass").is_ok());

        assert_eq!(
            validate_password("str0ng!pass").unwrap_err().message(),
            "Password must contain at least one uppercase letter (A-Z)"
        );
        assert_eq!(
            validate_password("STR0NG!PASS").unwrap_err().message(),
            "Password must contain at least one lowercase letter (a-z)"
        );
        assert_eq!(
            validate_password("Strong!pass").unwrap_err().message(),
            "Password must contain at least one number (0-9)"
        );
        assert_eq!(
            validate_password("Str0ngpass").unwrap_err().message(),
            "Password must contain at least one special character (!@#$%^&* etc.)"
        );
    }

    #[test]
    fn password_length_is_checked_before_classes() {
        // Missing classes too, but the length message wins below 8 chars.
        assert_eq!(
            validate_password("a1!").unwrap_err().message(),
            "Password must be at least 8 characters long"
        );
    }

    #[test]
    fn validators_are_idempotent() {
        for input in ["John Doe", "", "9876543210", "user@example.com.com"] {
            assert_eq!(validate_name(input), validate_name(input));
            assert_eq!(validate_email(input), validate_email(input));
            assert_eq!(validate_phone(input), validate_phone(input));
            assert_eq!(validate_password(input), validate_password(input));
        }
    }
}
