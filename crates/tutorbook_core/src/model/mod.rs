//! Canonical domain model for person records.
//!
//! # Responsibility
//! - Define the single record shape shared by the Student and Parent roles.
//! - Keep link references expressed as validated names.
//!
//! # Invariants
//! - Every record is identified by a stable `PersonId`.
//! - Role-specific data lives in the `PersonKind` payload, not in flags.

pub mod person;
