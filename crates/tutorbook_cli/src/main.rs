//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tutorbook_core` wiring
//!   end-to-end: seed a store, link a student to a parent, print the result.
//! - Keep output deterministic for quick local sanity checks.

use tutorbook_core::{
    default_log_level, init_logging, InMemoryPersonRepository, LinkService, Name, ParentProfile,
    Person, PersonKind, PersonService, StudentProfile,
};

fn main() {
    // Logging stays off unless the environment opts in; the smoke output
    // itself goes to stdout either way.
    if let Ok(log_dir) = std::env::var("TUTORBOOK_LOG_DIR") {
        let level = std::env::var("TUTORBOOK_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = InMemoryPersonRepository::new();

    let child_name = Name::new("John Doe")?;
    let parent_name = Name::new("Jane Doe")?;

    let mut persons = PersonService::new(&mut store);
    persons.add_person(&Person::new(
        child_name.clone(),
        "91234567",
        "john@example.com",
        "9 Cedar Avenue",
        PersonKind::Student(StudentProfile::new("mon 1600", "secondary", "3")),
    ))?;
    persons.add_person(&Person::new(
        parent_name.clone(),
        "98765432",
        "jane@example.com",
        "9 Cedar Avenue",
        PersonKind::Parent(ParentProfile::default()),
    ))?;

    let outcome = LinkService::new(&mut store).link(&child_name, &parent_name)?;
    println!("{outcome}");
    println!("tutorbook_core version={}", tutorbook_core::core_version());
    Ok(())
}
