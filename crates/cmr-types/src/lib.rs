//! Shared value types for the clinic meeting registry.
//!
//! These types carry the small invariants the rest of the workspace relies
//! on: non-empty text, the two separate identifier namespaces, and the
//! string-backed clinic date with its lexicographic ordering contract.

use serde::{Deserialize, Serialize};

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when parsing an identifier from user input.
#[derive(Debug, thiserror::Error)]
pub enum IdParseError {
    /// The input was not a base-10 integer
    #[error("Identifier must be a number")]
    NotANumber,
    /// The input parsed to zero; identifiers start at 1
    #[error("Identifier must be 1 or greater")]
    Zero,
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one
/// non-whitespace character. The input is trimmed of leading and trailing
/// whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the
    /// trimmed result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_id(input: &str) -> Result<u32, IdParseError> {
    let value: u32 = input
        .trim()
        .parse()
        .map_err(|_| IdParseError::NotANumber)?;
    if value == 0 {
        return Err(IdParseError::Zero);
    }
    Ok(value)
}

/// Identifier of a patient record.
///
/// Patient and doctor identifiers live in separate namespaces: both count
/// from 1, and the same number names different records in each. The two
/// newtypes keep the namespaces from being mixed up at compile time.
/// Identifiers are assigned only by the registry and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(u32);

/// Identifier of a doctor record. See [`PatientId`] for namespace rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(u32);

impl PatientId {
    /// Wraps a raw identifier value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl DoctorId {
    /// Wraps a raw identifier value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for DoctorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PatientId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id(s).map(Self)
    }
}

impl std::str::FromStr for DoctorId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_id(s).map(Self)
    }
}

/// A calendar date carried as a `YYYY-MM-DD` string.
///
/// Format contract: ordering is plain string comparison, which agrees with
/// calendar order only because the format is fixed-width and zero-padded.
/// The constructor does not validate the shape; a malformed string is
/// accepted and sorts as ordinary text. Callers that want calendar
/// guarantees must supply well-formed input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClinicDate(String);

impl ClinicDate {
    /// Wraps the given date string, trimming surrounding whitespace.
    pub fn new(input: impl AsRef<str>) -> Self {
        Self(input.as_ref().trim().to_owned())
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClinicDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ClinicDate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
