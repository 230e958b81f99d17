//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! trimmed non-empty names, digit-only phone numbers) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(AdvocateId, "Unique identifier for an advocate.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    PersonName,
    "First or last name wrapper enforcing trimmed, non-empty values."
);

non_empty_string_newtype!(CityName, "City wrapper enforcing trimmed, non-empty values.");

non_empty_string_newtype!(
    DegreeName,
    "Degree or credential wrapper enforcing trimmed, non-empty values."
);

non_empty_string_newtype!(
    Specialty,
    "Specialty tag wrapper enforcing trimmed, non-empty values."
);

/// Non-negative number of years an advocate has practiced.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearsOfExperience(u32);

impl YearsOfExperience {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for YearsOfExperience {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for YearsOfExperience {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidValue(format!("{value} years")))
    }
}

/// Number of digits in a domestic phone number rendered with area code.
const DOMESTIC_PHONE_DIGITS: usize = 10;

/// Phone number stored as its numeric value.
///
/// Serialized as a plain JSON number. [`PhoneNumber::digits`] yields the
/// digits-only form used for searching and [`PhoneNumber::formatted`] the
/// `(AAA) BBB-CCCC` form used for display.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(u64);

impl PhoneNumber {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Parses a phone number from free-form text, keeping only its digits.
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let digits: String = value.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(TypeConstraintError::InvalidPhone);
        }
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidPhone)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Digits-only representation.
    pub fn digits(&self) -> String {
        self.0.to_string()
    }

    /// Display form: `(555) 123-4567` for ten digits, the bare digits otherwise.
    pub fn formatted(&self) -> String {
        let digits = self.digits();
        if digits.len() == DOMESTIC_PHONE_DIGITS {
            format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
        } else {
            digits
        }
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

impl TryFrom<i64> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidPhone)
    }
}

impl From<PhoneNumber> for u64 {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advocate_id_rejects_non_positive() {
        assert_eq!(AdvocateId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(AdvocateId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(AdvocateId::new(7).map(AdvocateId::get), Ok(7));
    }

    #[test]
    fn names_are_trimmed_and_non_empty() {
        assert_eq!(PersonName::new("  Jane ").unwrap().as_str(), "Jane");
        assert_eq!(CityName::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn years_reject_negative_values() {
        assert!(YearsOfExperience::try_from(-1).is_err());
        assert_eq!(YearsOfExperience::try_from(12).unwrap().get(), 12);
    }

    #[test]
    fn phone_formats_ten_digit_numbers() {
        let phone = PhoneNumber::new(5551234567);
        assert_eq!(phone.digits(), "5551234567");
        assert_eq!(phone.formatted(), "(555) 123-4567");
    }

    #[test]
    fn phone_leaves_other_lengths_untouched() {
        assert_eq!(PhoneNumber::new(12345).formatted(), "12345");
        assert_eq!(PhoneNumber::new(15551234567).formatted(), "15551234567");
    }

    #[test]
    fn phone_parse_strips_punctuation() {
        assert_eq!(
            PhoneNumber::parse("(555) 123-4567").unwrap(),
            PhoneNumber::new(5551234567)
        );
        assert_eq!(
            PhoneNumber::parse("n/a"),
            Err(TypeConstraintError::InvalidPhone)
        );
    }
}
