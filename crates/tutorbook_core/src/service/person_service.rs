//! Person lifecycle use-case service.
//!
//! # Responsibility
//! - Provide validated insert and query entry points for person records.
//! - Rewrite pinned/archived flags through immutable replacement by identity.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - The service layer stays storage-agnostic.

use crate::model::person::{Name, Person, PersonId};
use crate::repo::person_repo::{PersonListQuery, PersonRepository, RepoError, RepoResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for person lifecycle use-cases.
#[derive(Debug)]
pub enum PersonServiceError {
    /// Target person does not exist.
    PersonNotFound(PersonId),
    /// Storage-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for PersonServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersonNotFound(id) => write!(f, "person not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
        }
    }
}

impl Error for PersonServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PersonServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::PersonNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service wrapper for person record lifecycle.
pub struct PersonService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> PersonService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a validated person and returns the stored record.
    pub fn add_person(&mut self, person: &Person) -> Result<Person, PersonServiceError> {
        let id = self.repo.add_person(person)?;
        info!("event=add_person module=service status=ok person_id={id}");
        self.repo
            .get_person(id)?
            .ok_or(PersonServiceError::InconsistentState(
                "created person not found in read-back",
            ))
    }

    /// Gets one person by stable ID.
    pub fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        self.repo.get_person(id)
    }

    /// Resolves the first person with the given name, in insertion order.
    pub fn find_person_by_name(&self, name: &Name) -> RepoResult<Option<Person>> {
        self.repo.find_person_by_name(name)
    }

    /// Lists persons using role and archived-visibility options.
    pub fn list_persons(&self, query: &PersonListQuery) -> RepoResult<Vec<Person>> {
        self.repo.list_persons(query)
    }

    /// Rewrites the pinned flag via replacement by identity.
    pub fn set_pinned(&mut self, id: PersonId, pinned: bool) -> Result<Person, PersonServiceError> {
        self.rewrite(id, |person| person.pinned = pinned)
    }

    /// Rewrites the archived flag via replacement by identity.
    ///
    /// Archived records stay resolvable by name; only default listings hide
    /// them.
    pub fn set_archived(
        &mut self,
        id: PersonId,
        archived: bool,
    ) -> Result<Person, PersonServiceError> {
        self.rewrite(id, |person| person.archived = archived)
    }

    fn rewrite(
        &mut self,
        id: PersonId,
        apply: impl FnOnce(&mut Person),
    ) -> Result<Person, PersonServiceError> {
        let mut person = self
            .repo
            .get_person(id)?
            .ok_or(PersonServiceError::PersonNotFound(id))?;
        apply(&mut person);
        self.repo.replace_person(id, &person)?;
        Ok(person)
    }
}
