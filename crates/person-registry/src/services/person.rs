//! Person service for registering and looking up persons.

use std::sync::Arc;

use crate::db::{
    NewPerson, NewPersonEvent, Person, PersonEvent, PersonEventRepository, PersonRepository,
};
use pgdemo_common::{AppError, AppResult, ResultExt};

/// Maximum accepted name length (matches the column width).
const MAX_NAME_LEN: usize = 255;

/// Service for person operations.
#[derive(Clone)]
pub struct PersonService {
    persons: Arc<dyn PersonRepository>,
    events: Arc<dyn PersonEventRepository>,
}

impl PersonService {
    /// Create a new person service.
    pub fn new(persons: Arc<dyn PersonRepository>, events: Arc<dyn PersonEventRepository>) -> Self {
        Self { persons, events }
    }

    /// Store a person, then its `CREATED` event.
    ///
    /// Names are stored exactly as given.
    ///
    /// The two inserts are not atomic: if the event insert fails the person
    /// row stays and the error is returned.
    pub async fn create(&self, first_name: &str, last_name: &str) -> AppResult<Person> {
        validate_name("first_name", first_name)?;
        validate_name("last_name", last_name)?;

        let draft = NewPerson {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };
        let event = NewPersonEvent::created(&draft);

        let person = self.persons.save(draft).await.log("saving person")?;
        self.events.save(event).await.log("saving person event")?;

        tracing::info!(id = person.id, last_name = %person.last_name, "Person created");

        Ok(person)
    }

    /// All persons.
    pub async fn list(&self) -> AppResult<Vec<Person>> {
        self.persons.find_all().await
    }

    /// Persons with the given last name.
    pub async fn find_by_last_name(&self, last_name: &str) -> AppResult<Vec<Person>> {
        self.persons.find_all_by_last_name(last_name).await
    }

    /// All person events.
    pub async fn events(&self) -> AppResult<Vec<PersonEvent>> {
        self.events.find_all().await
    }
}

fn validate_name(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be blank", field)));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "{} exceeds {} characters",
            field, MAX_NAME_LEN
        )));
    }
    Ok(())
}
