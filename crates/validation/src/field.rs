//! Per-field dispatch for incremental (per-keystroke) validation.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::{validate_email, validate_name, validate_password, validate_phone};

/// Logical form fields the validators know about.
///
/// First/last name share the name rules; the distinction only matters for
/// which input box shows the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Password,
}

impl Field {
    /// Field name as it appears in form payloads and error maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::PhoneNumber => "phoneNumber",
            Field::Password => "password",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown field name (not validated by this module).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "firstName" => Ok(Field::FirstName),
            "lastName" => Ok(Field::LastName),
            "email" => Ok(Field::Email),
            "phoneNumber" => Ok(Field::PhoneNumber),
            "password" => Ok(Field::Password),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Validate one field, returning only the error message (if any).
///
/// This is the entry point for live feedback as the user types: `None`
/// clears the inline error, `Some(msg)` replaces it.
pub fn validate_field(field: Field, value: &str) -> Option<&'static str> {
    let result = match field {
        Field::Name | Field::FirstName | Field::LastName => validate_name(value),
        Field::Email => validate_email(value),
        Field::PhoneNumber => validate_phone(value),
        Field::Password => validate_password(value),
    };
    result.err().map(|e| e.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_last_name_use_name_rules() {
        assert_eq!(
            validate_field(Field::FirstName, "J4ne"),
            Some("Name must not contain numbers")
        );
        assert_eq!(validate_field(Field::LastName, "Doe"), None);
    }

    #[test]
    fn field_names_round_trip() {
        for field in [
            Field::Name,
            Field::FirstName,
            Field::LastName,
            Field::Email,
            Field::PhoneNumber,
            Field::Password,
        ] {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
        assert!("birthday".parse::<Field>().is_err());
    }

    #[test]
    fn valid_value_clears_the_error() {
        assert_eq!(validate_field(Field::PhoneNumber, "9876543210"), None);
        assert_eq!(
            validate_field(Field::PhoneNumber, "1234567890"),
            Some("Phone number must start with 6, 7, 8, or 9 (Indian mobile numbers only)")
        );
    }
}
