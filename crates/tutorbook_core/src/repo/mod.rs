//! Repository layer contract and in-memory storage.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for person records.
//! - Keep arena bookkeeping details out of service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Person::validate()` before mutation.
//! - Replacement is keyed by prior identity, never by name.

pub mod person_repo;
