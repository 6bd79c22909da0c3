//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email, sanitized free text) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::{ops::Deref, str::FromStr};

use phonenumber::{Mode, country, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Monetary amount below zero.
    #[error("amount cannot be negative")]
    NegativeAmount,
    /// Numeric value outside of the accepted range.
    #[error("value {value} is outside of {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
    /// Provided uuid failed format validation.
    #[error("invalid uuid value")]
    InvalidUuid,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Implements the conversions shared by every string-backed value object.
macro_rules! string_conversions {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
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

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "i32", into = "i32")]
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

id_newtype!(CustomerId, "Unique identifier for a CRM customer.");
id_newtype!(DealId, "Unique identifier for a pipeline deal.");
id_newtype!(TaskId, "Unique identifier for a CRM task.");
id_newtype!(ActivityId, "Unique identifier for a logged activity.");
id_newtype!(DriveFileId, "Unique identifier for a stored drive file.");
id_newtype!(LeadId, "Unique identifier for an inbound lead.");
id_newtype!(ChatSessionId, "Unique identifier for a chat widget session.");
id_newtype!(ChatMessageId, "Unique identifier for a chat message.");
id_newtype!(QuizResultId, "Unique identifier for a stored quiz result.");
id_newtype!(ArticleId, "Unique identifier for a knowledge base article.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }
}

string_conversions!(EmailAddress);

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
}

string_conversions!(NonEmptyString);

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        string_conversions!($name);
    };
}

non_empty_string_newtype!(CustomerName, "Organisation name of a customer.");
non_empty_string_newtype!(PersonName, "Name of a contact person or lead.");
non_empty_string_newtype!(DealTitle, "Short title of a pipeline deal.");
non_empty_string_newtype!(TaskTitle, "Short title of a CRM task.");
non_empty_string_newtype!(ArticleTitle, "Knowledge base article title.");
non_empty_string_newtype!(ArticleCategory, "Knowledge base category label.");
non_empty_string_newtype!(FileName, "Original file name of an uploaded file.");
non_empty_string_newtype!(VisitorId, "Opaque identifier of a chat widget visitor.");

/// Free text that is sanitized with ammonia and must stay non-empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct SanitizedText(String);

impl SanitizedText {
    /// Constructs a sanitized, trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = ammonia::clean(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        Ok(Self(inner.into_inner()))
    }
}

string_conversions!(SanitizedText);

/// Normalizes a phone number string to E.164 format, assuming Dutch numbers
/// when no country prefix is given.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed =
        parse(Some(country::Id::NL), trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }
}

string_conversions!(PhoneNumber);

/// Monetary amount in whole euro cents.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64", into = "i64")]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    pub fn new(cents: i64) -> Result<Self, TypeConstraintError> {
        if cents < 0 {
            Err(TypeConstraintError::NegativeAmount)
        } else {
            Ok(Self(cents))
        }
    }

    /// Converts a euro amount, rounding to the nearest cent.
    pub fn from_euros(euros: f64) -> Result<Self, TypeConstraintError> {
        if !euros.is_finite() {
            return Err(TypeConstraintError::InvalidValue(euros.to_string()));
        }
        Self::new((euros * 100.0).round() as i64)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn as_euros(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Applies a probability percentage, rounding down to whole cents.
    pub fn weighted(self, probability: Probability) -> MoneyCents {
        MoneyCents(self.0 * i64::from(probability.get()) / 100)
    }

    pub fn saturating_add(self, other: MoneyCents) -> MoneyCents {
        MoneyCents(self.0.saturating_add(other.0))
    }
}

impl Display for MoneyCents {
    /// Formats the amount the Dutch way, e.g. `€ 1.234,56`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let euros = self.0 / 100;
        let cents = self.0 % 100;
        let digits = euros.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        write!(f, "€ {grouped},{cents:02}")
    }
}

impl TryFrom<i64> for MoneyCents {
    type Error = TypeConstraintError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

/// Win probability percentage in `0..=100`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i32", into = "i32")]
pub struct Probability(u8);

impl Probability {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(TypeConstraintError::OutOfRange {
                value: i64::from(value),
                min: 0,
                max: 100,
            })
        }
    }

    /// Builds a probability, capping values above 100.
    pub const fn saturating(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Probability {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Probability> for i32 {
    fn from(value: Probability) -> Self {
        i32::from(value.0)
    }
}

/// URL slug of a knowledge base article: lower-case ASCII alphanumerics
/// separated by single dashes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ArticleSlug(String);

impl ArticleSlug {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        let valid = value
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        if valid {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidValue(value))
        }
    }

    /// Derives a slug from a title, transliterating common accented letters.
    pub fn from_title(title: &str) -> Result<Self, TypeConstraintError> {
        let mut slug = String::with_capacity(title.len());
        for ch in title.chars().flat_map(char::to_lowercase) {
            let ch = match ch {
                'à' | 'á' | 'â' | 'ä' => 'a',
                'è' | 'é' | 'ê' | 'ë' => 'e',
                'ì' | 'í' | 'î' | 'ï' => 'i',
                'ò' | 'ó' | 'ô' | 'ö' => 'o',
                'ù' | 'ú' | 'û' | 'ü' => 'u',
                other => other,
            };
            if ch.is_ascii_alphanumeric() {
                slug.push(ch);
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        Self::new(slug)
    }
}

string_conversions!(ArticleSlug);

/// Random storage key under which drive files are written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageKey(Uuid);

impl StorageKey {
    /// Generate a new random storage key.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StorageKey {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            Uuid::parse_str(s).map_err(|_| TypeConstraintError::InvalidUuid)?,
        ))
    }
}

impl Default for StorageKey {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses an optional free-text field: blank input becomes `None`.
pub fn optional_text<T, F>(value: Option<String>, ctor: F) -> Result<Option<T>, TypeConstraintError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    match value {
        Some(value) if !value.trim().is_empty() => ctor(value).map(Some),
        _ => Ok(None),
    }
}
