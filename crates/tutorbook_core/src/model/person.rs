//! Person domain model.
//!
//! # Responsibility
//! - Define the canonical contact record shared by Students and Parents.
//! - Validate every field before a record reaches storage.
//!
//! # Invariants
//! - `id` is stable and never reused for another person.
//! - A `Name` value is always well-formed; malformed input never constructs one.
//! - A Student references at most one Parent name, a Parent at most one
//!   Student name.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every person record in the store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PersonId = Uuid;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9][A-Za-z0-9.-]*$").expect("valid email regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L}\p{N}]+$").expect("valid tag regex"));

/// Validation error for person records and name values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    /// Record carries the nil UUID.
    NilId,
    /// Name is empty or contains characters outside alphanumeric words.
    InvalidName(String),
    /// Phone is not a run of at least 3 digits.
    InvalidPhone(String),
    /// Email does not match the `local@domain` shape.
    InvalidEmail(String),
    /// Address is empty after trimming.
    EmptyAddress,
    /// Tag is not a single alphanumeric word.
    InvalidTag(String),
    /// A required student profile field is empty after trimming.
    EmptyStudentField(&'static str),
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "person id must not be nil"),
            Self::InvalidName(value) => write!(
                f,
                "invalid name `{value}`; expected alphanumeric words separated by spaces"
            ),
            Self::InvalidPhone(value) => {
                write!(f, "invalid phone `{value}`; expected at least 3 digits")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email `{value}`"),
            Self::EmptyAddress => write!(f, "address must not be empty"),
            Self::InvalidTag(value) => {
                write!(f, "invalid tag `{value}`; expected one alphanumeric word")
            }
            Self::EmptyStudentField(field) => write!(f, "student {field} must not be empty"),
        }
    }
}

impl Error for PersonValidationError {}

/// Validated full name.
///
/// Doubles as the lookup key for link references, so it is kept immutable
/// after construction. Equality is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Parses a full name, trimming surrounding whitespace.
    ///
    /// # Errors
    /// Returns `InvalidName` when the trimmed value is empty or contains
    /// anything other than alphanumeric words separated by spaces.
    pub fn new(value: impl Into<String>) -> Result<Self, PersonValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if !NAME_RE.is_match(trimmed) {
            return Err(PersonValidationError::InvalidName(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = PersonValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload-free role discriminant used for filtering and variant checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    Student,
    Parent,
}

/// Role payload for students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Weekly lesson slot, free-form (for example `mon 1600`).
    pub lesson_time: String,
    /// Education level label.
    pub education: String,
    /// Grade label.
    pub grade: String,
    /// Name of the linked Parent record, if any.
    pub parent_name: Option<Name>,
}

impl StudentProfile {
    /// Creates an unlinked student profile.
    pub fn new(
        lesson_time: impl Into<String>,
        education: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            lesson_time: lesson_time.into(),
            education: education.into(),
            grade: grade.into(),
            parent_name: None,
        }
    }
}

/// Role payload for parents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentProfile {
    /// Name of the linked Student record, if any.
    pub child_name: Option<Name>,
}

/// Role-specific half of a person record.
///
/// Serialized with an internal `role` tag so the wire shape stays flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum PersonKind {
    Student(StudentProfile),
    Parent(ParentProfile),
}

/// Canonical contact record for both roles.
///
/// Records are immutable value objects: "mutation" means building a
/// replacement record and substituting it in the store by prior identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Stable global ID used for replacement keying and auditing.
    pub id: PersonId,
    pub name: Name,
    /// Digits only, at least 3.
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Normalized free-form labels, one alphanumeric word each.
    pub tags: BTreeSet<String>,
    pub pinned: bool,
    pub archived: bool,
    /// Role payload; the single source of truth for link references.
    pub kind: PersonKind,
}

impl Person {
    /// Creates a new person with a generated stable ID.
    ///
    /// Tags start empty; `pinned` and `archived` start `false`.
    pub fn new(
        name: Name,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        kind: PersonKind,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), name, phone, email, address, kind)
    }

    /// Creates a new person with a caller-provided stable ID.
    ///
    /// Used by import paths and tests where identity already exists. The
    /// provided `id` must remain stable for this record's lifetime; validity
    /// is checked by `validate()` on the write path, not here.
    pub fn with_id(
        id: PersonId,
        name: Name,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        kind: PersonKind,
    ) -> Self {
        Self {
            id,
            name,
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
            tags: BTreeSet::new(),
            pinned: false,
            archived: false,
            kind,
        }
    }

    /// Returns the payload-free role of this record.
    pub fn role(&self) -> PersonRole {
        match &self.kind {
            PersonKind::Student(_) => PersonRole::Student,
            PersonKind::Parent(_) => PersonRole::Parent,
        }
    }

    pub fn as_student(&self) -> Option<&StudentProfile> {
        match &self.kind {
            PersonKind::Student(profile) => Some(profile),
            PersonKind::Parent(_) => None,
        }
    }

    pub fn as_parent(&self) -> Option<&ParentProfile> {
        match &self.kind {
            PersonKind::Parent(profile) => Some(profile),
            PersonKind::Student(_) => None,
        }
    }

    /// Returns the counterpart name this record is linked to, if any.
    pub fn linked_name(&self) -> Option<&Name> {
        match &self.kind {
            PersonKind::Student(profile) => profile.parent_name.as_ref(),
            PersonKind::Parent(profile) => profile.child_name.as_ref(),
        }
    }

    /// Checks every field against the record constraints.
    ///
    /// Write paths call this before mutating the store, so no invalid record
    /// is ever observable through the repository.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.id.is_nil() {
            return Err(PersonValidationError::NilId);
        }
        if !PHONE_RE.is_match(&self.phone) {
            return Err(PersonValidationError::InvalidPhone(self.phone.clone()));
        }
        if !EMAIL_RE.is_match(&self.email) {
            return Err(PersonValidationError::InvalidEmail(self.email.clone()));
        }
        if self.address.trim().is_empty() {
            return Err(PersonValidationError::EmptyAddress);
        }
        for tag in &self.tags {
            if !TAG_RE.is_match(tag) {
                return Err(PersonValidationError::InvalidTag(tag.clone()));
            }
        }
        if let PersonKind::Student(profile) = &self.kind {
            let required = [
                ("lesson time", profile.lesson_time.as_str()),
                ("education", profile.education.as_str()),
                ("grade", profile.grade.as_str()),
            ];
            for (field, value) in required {
                if value.trim().is_empty() {
                    return Err(PersonValidationError::EmptyStudentField(field));
                }
            }
        }
        Ok(())
    }
}
