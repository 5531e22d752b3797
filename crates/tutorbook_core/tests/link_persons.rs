use tutorbook_core::{
    InMemoryPersonRepository, LinkError, LinkService, Name, ParentProfile, Person, PersonKind,
    PersonRepository, StudentProfile,
};
use uuid::Uuid;

fn name(value: &str) -> Name {
    Name::new(value).unwrap()
}

fn student(full_name: &str) -> Person {
    Person::new(
        name(full_name),
        "91234567",
        "student@example.com",
        "9 Cedar Avenue",
        PersonKind::Student(StudentProfile::new("mon 1600", "secondary", "3")),
    )
}

fn parent(full_name: &str) -> Person {
    Person::new(
        name(full_name),
        "98765432",
        "parent@example.com",
        "9 Cedar Avenue",
        PersonKind::Parent(ParentProfile::default()),
    )
}

fn seeded_store() -> InMemoryPersonRepository {
    let mut store = InMemoryPersonRepository::new();
    store.add_person(&student("John Doe")).unwrap();
    store.add_person(&parent("Jane Doe")).unwrap();
    store
}

fn by_name(store: &InMemoryPersonRepository, full_name: &str) -> Person {
    store
        .find_person_by_name(&name(full_name))
        .unwrap()
        .expect("record should exist")
}

#[test]
fn link_establishes_mutual_reference() {
    let mut store = seeded_store();

    let outcome = LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Jane Doe"))
        .unwrap();
    assert_eq!(
        outcome.to_string(),
        "Successfully linked Student: John Doe to Parent: Jane Doe"
    );

    assert_eq!(
        by_name(&store, "John Doe").linked_name(),
        Some(&name("Jane Doe"))
    );
    assert_eq!(
        by_name(&store, "Jane Doe").linked_name(),
        Some(&name("John Doe"))
    );
}

#[test]
fn link_preserves_all_other_fields() {
    let mut store = InMemoryPersonRepository::new();

    let mut child = student("John Doe");
    child.tags.insert("algebra".to_string());
    child.pinned = true;
    store.add_person(&child).unwrap();
    let parent_record = parent("Jane Doe");
    store.add_person(&parent_record).unwrap();

    LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Jane Doe"))
        .unwrap();

    let mut expected_child = child.clone();
    if let PersonKind::Student(profile) = &mut expected_child.kind {
        profile.parent_name = Some(name("Jane Doe"));
    }
    assert_eq!(store.get_person(child.id).unwrap().unwrap(), expected_child);

    let mut expected_parent = parent_record.clone();
    if let PersonKind::Parent(profile) = &mut expected_parent.kind {
        profile.child_name = Some(name("John Doe"));
    }
    assert_eq!(
        store.get_person(parent_record.id).unwrap().unwrap(),
        expected_parent
    );
}

#[test]
fn missing_parent_fails_and_leaves_store_untouched() {
    let mut store = InMemoryPersonRepository::new();
    store.add_person(&student("John Doe")).unwrap();

    let err = LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Jane Doe"))
        .unwrap_err();
    assert!(matches!(err, LinkError::ParentNotFound(_)));
    assert_eq!(
        err.to_string(),
        "Parent: Jane Doe does not exist in the address book"
    );

    assert_eq!(by_name(&store, "John Doe").linked_name(), None);
}

#[test]
fn missing_child_fails_and_leaves_store_untouched() {
    let mut store = InMemoryPersonRepository::new();
    store.add_person(&parent("Jane Doe")).unwrap();

    let err = LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Jane Doe"))
        .unwrap_err();
    assert!(matches!(err, LinkError::ChildNotFound(_)));
    assert_eq!(
        err.to_string(),
        "Student: John Doe does not exist in the address book"
    );

    assert_eq!(by_name(&store, "Jane Doe").linked_name(), None);
}

#[test]
fn parent_name_resolving_to_student_is_parent_not_found() {
    let mut store = InMemoryPersonRepository::new();
    store.add_person(&student("John Doe")).unwrap();
    store.add_person(&student("Jane Doe")).unwrap();

    let err = LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Jane Doe"))
        .unwrap_err();
    assert!(matches!(err, LinkError::ParentNotFound(_)));
}

#[test]
fn child_name_resolving_to_parent_is_child_not_found() {
    let mut store = InMemoryPersonRepository::new();
    store.add_person(&parent("John Doe")).unwrap();
    store.add_person(&parent("Jane Doe")).unwrap();

    let err = LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Jane Doe"))
        .unwrap_err();
    assert!(matches!(err, LinkError::ChildNotFound(_)));

    assert_eq!(by_name(&store, "Jane Doe").linked_name(), None);
}

#[test]
fn linked_parent_rejects_second_child_and_reports_existing_link() {
    let mut store = seeded_store();
    store.add_person(&student("Amy Tan")).unwrap();

    LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Jane Doe"))
        .unwrap();

    let err = LinkService::new(&mut store)
        .link(&name("Amy Tan"), &name("Jane Doe"))
        .unwrap_err();
    assert!(matches!(err, LinkError::ParentAlreadyLinked { .. }));
    assert_eq!(
        err.to_string(),
        "Parent: Jane Doe has an existing link to Student: John Doe"
    );

    assert_eq!(by_name(&store, "Amy Tan").linked_name(), None);
}

#[test]
fn linked_child_rejects_second_parent_and_reports_existing_link() {
    let mut store = seeded_store();
    store.add_person(&parent("Mary Lim")).unwrap();

    LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Jane Doe"))
        .unwrap();

    let err = LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Mary Lim"))
        .unwrap_err();
    assert!(matches!(err, LinkError::ChildAlreadyLinked { .. }));
    assert_eq!(
        err.to_string(),
        "Student: John Doe has an existing link to Parent: Jane Doe"
    );

    assert_eq!(by_name(&store, "Mary Lim").linked_name(), None);
}

#[test]
fn repeating_a_failing_link_yields_the_same_error() {
    let mut store = seeded_store();

    LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Jane Doe"))
        .unwrap();

    let first = LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Jane Doe"))
        .unwrap_err();
    let second = LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Jane Doe"))
        .unwrap_err();

    assert!(matches!(first, LinkError::ParentAlreadyLinked { .. }));
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn duplicate_names_replace_only_the_resolved_record() {
    let mut store = InMemoryPersonRepository::new();
    store.add_person(&student("John Doe")).unwrap();

    let mut first = parent("Jane Doe");
    first.id = Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap();
    let mut second = parent("Jane Doe");
    second.id = Uuid::parse_str("00000000-0000-4000-8000-000000000002").unwrap();
    store.add_person(&first).unwrap();
    store.add_person(&second).unwrap();

    LinkService::new(&mut store)
        .link(&name("John Doe"), &name("Jane Doe"))
        .unwrap();

    let first_after = store.get_person(first.id).unwrap().unwrap();
    assert_eq!(first_after.linked_name(), Some(&name("John Doe")));

    let second_after = store.get_person(second.id).unwrap().unwrap();
    assert_eq!(second_after, second);
}
