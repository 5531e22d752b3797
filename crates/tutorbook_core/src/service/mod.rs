//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep command/UI layers decoupled from storage details.

pub mod link_service;
pub mod person_service;
