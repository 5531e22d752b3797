//! Parent-student link use-case.
//!
//! # Responsibility
//! - Resolve a Student and a Parent by name and link them into a mutual
//!   reference.
//! - Report every outcome as a user-facing message.
//!
//! # Invariants
//! - All resolution and link checks precede the first store mutation; a
//!   failing call leaves the store untouched.
//! - Replacement is keyed by the resolved records' prior identity, never by
//!   name, so duplicate names cannot misdirect the swap.

use crate::model::person::{Name, Person, PersonKind, PersonRole};
use crate::repo::person_repo::{PersonRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error taxonomy for the link operation.
///
/// Every variant renders as the user-facing message reported back on the
/// command surface. A record resolving to the wrong variant is reported the
/// same way as a missing record.
#[derive(Debug)]
pub enum LinkError {
    ParentNotFound(Name),
    ChildNotFound(Name),
    ParentAlreadyLinked { parent: Name, child: Name },
    ChildAlreadyLinked { child: Name, parent: Name },
    Repo(RepoError),
}

impl Display for LinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParentNotFound(name) => {
                write!(f, "Parent: {name} does not exist in the address book")
            }
            Self::ChildNotFound(name) => {
                write!(f, "Student: {name} does not exist in the address book")
            }
            Self::ParentAlreadyLinked { parent, child } => {
                write!(f, "Parent: {parent} has an existing link to Student: {child}")
            }
            Self::ChildAlreadyLinked { child, parent } => {
                write!(f, "Student: {child} has an existing link to Parent: {parent}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for LinkError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Successful link result.
///
/// Displays as the success message shown on the command surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    pub child: Name,
    pub parent: Name,
}

impl Display for LinkOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Successfully linked Student: {} to Parent: {}",
            self.child, self.parent
        )
    }
}

/// Use-case service for linking person records.
pub struct LinkService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> LinkService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Links the named Student and Parent into a mutual reference.
    ///
    /// # Contract
    /// - Resolves the parent first, then the child; either missing or of the
    ///   wrong variant fails with the matching not-found error.
    /// - A record that already carries a link fails with the matching
    ///   already-linked error, reporting the existing counterpart.
    /// - On success both records are replaced by prior identity and the
    ///   outcome carries both names.
    pub fn link(
        &mut self,
        child_name: &Name,
        parent_name: &Name,
    ) -> Result<LinkOutcome, LinkError> {
        let parent = match self.repo.find_person_by_name(parent_name)? {
            Some(person) if person.role() == PersonRole::Parent => person,
            _ => return Err(LinkError::ParentNotFound(parent_name.clone())),
        };
        let child = match self.repo.find_person_by_name(child_name)? {
            Some(person) if person.role() == PersonRole::Student => person,
            _ => return Err(LinkError::ChildNotFound(child_name.clone())),
        };

        if let Some(existing) = parent.as_parent().and_then(|p| p.child_name.as_ref()) {
            return Err(LinkError::ParentAlreadyLinked {
                parent: parent.name.clone(),
                child: existing.clone(),
            });
        }
        if let Some(existing) = child.as_student().and_then(|s| s.parent_name.as_ref()) {
            return Err(LinkError::ChildAlreadyLinked {
                child: child.name.clone(),
                parent: existing.clone(),
            });
        }

        let linked_child = with_parent_reference(&child, &parent);
        let linked_parent = with_child_reference(&parent, &child);

        self.repo.replace_person(child.id, &linked_child)?;
        self.repo.replace_person(parent.id, &linked_parent)?;

        info!(
            "event=link_persons module=service status=ok child_id={} parent_id={}",
            child.id, parent.id
        );

        Ok(LinkOutcome {
            child: child.name,
            parent: parent.name,
        })
    }
}

/// Rebuilds the student record with its parent reference set.
fn with_parent_reference(child: &Person, parent: &Person) -> Person {
    let mut linked = child.clone();
    if let PersonKind::Student(profile) = &mut linked.kind {
        profile.parent_name = Some(parent.name.clone());
    }
    linked
}

/// Rebuilds the parent record with its child reference set.
fn with_child_reference(parent: &Person, child: &Person) -> Person {
    let mut linked = parent.clone();
    if let PersonKind::Parent(profile) = &mut linked.kind {
        profile.child_name = Some(child.name.clone());
    }
    linked
}
