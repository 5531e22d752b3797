//! Person repository contract and in-memory arena implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical person store.
//! - Keep slot bookkeeping inside the storage boundary.
//!
//! # Invariants
//! - Write paths call `Person::validate()` before touching the arena.
//! - Replacement updates the slot of the prior identity; insertion order is
//!   stable across replacements.
//! - Duplicate names are legal; identity is always the `PersonId`.

use crate::model::person::{Name, Person, PersonId, PersonRole, PersonValidationError};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for person storage operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(PersonValidationError),
    NotFound(PersonId),
    DuplicateId(PersonId),
    IdMismatch { expected: PersonId, actual: PersonId },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "person not found: {id}"),
            Self::DuplicateId(id) => write!(f, "person id already in store: {id}"),
            Self::IdMismatch { expected, actual } => write!(
                f,
                "replacement id {actual} does not match target id {expected}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PersonValidationError> for RepoError {
    fn from(value: PersonValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Query options for listing persons.
#[derive(Debug, Clone, Default)]
pub struct PersonListQuery {
    pub role: Option<PersonRole>,
    pub include_archived: bool,
}

/// Repository interface for person storage.
///
/// Name lookup is a convenience resolver: first exact match in insertion
/// order wins, and every mutation keys on `PersonId` instead.
pub trait PersonRepository {
    fn add_person(&mut self, person: &Person) -> RepoResult<PersonId>;
    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>>;
    fn find_person_by_name(&self, name: &Name) -> RepoResult<Option<Person>>;
    fn replace_person(&mut self, id: PersonId, person: &Person) -> RepoResult<()>;
    fn list_persons(&self, query: &PersonListQuery) -> RepoResult<Vec<Person>>;
}

impl<R: PersonRepository + ?Sized> PersonRepository for &mut R {
    fn add_person(&mut self, person: &Person) -> RepoResult<PersonId> {
        (**self).add_person(person)
    }

    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        (**self).get_person(id)
    }

    fn find_person_by_name(&self, name: &Name) -> RepoResult<Option<Person>> {
        (**self).find_person_by_name(name)
    }

    fn replace_person(&mut self, id: PersonId, person: &Person) -> RepoResult<()> {
        (**self).replace_person(id, person)
    }

    fn list_persons(&self, query: &PersonListQuery) -> RepoResult<Vec<Person>> {
        (**self).list_persons(query)
    }
}

/// Arena-backed in-memory person store.
///
/// Records live in a `Vec` in insertion order; a side index maps each stable
/// ID to its slot so replacement is O(1) and never reorders the arena.
#[derive(Debug, Default)]
pub struct InMemoryPersonRepository {
    arena: Vec<Person>,
    index: HashMap<PersonId, usize>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

impl PersonRepository for InMemoryPersonRepository {
    fn add_person(&mut self, person: &Person) -> RepoResult<PersonId> {
        person.validate()?;

        if self.index.contains_key(&person.id) {
            return Err(RepoError::DuplicateId(person.id));
        }

        self.index.insert(person.id, self.arena.len());
        self.arena.push(person.clone());
        Ok(person.id)
    }

    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        Ok(self.index.get(&id).map(|&slot| self.arena[slot].clone()))
    }

    fn find_person_by_name(&self, name: &Name) -> RepoResult<Option<Person>> {
        Ok(self
            .arena
            .iter()
            .find(|person| &person.name == name)
            .cloned())
    }

    fn replace_person(&mut self, id: PersonId, person: &Person) -> RepoResult<()> {
        person.validate()?;

        if person.id != id {
            return Err(RepoError::IdMismatch {
                expected: id,
                actual: person.id,
            });
        }

        let slot = *self.index.get(&id).ok_or(RepoError::NotFound(id))?;
        self.arena[slot] = person.clone();
        Ok(())
    }

    fn list_persons(&self, query: &PersonListQuery) -> RepoResult<Vec<Person>> {
        Ok(self
            .arena
            .iter()
            .filter(|person| query.include_archived || !person.archived)
            .filter(|person| query.role.map_or(true, |role| person.role() == role))
            .cloned()
            .collect())
    }
}
