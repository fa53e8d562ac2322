//! Person and person event database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pgdemo_common::Record;

/// Action recorded when a person is created.
pub const ACTION_CREATED: &str = "CREATED";

/// A registered person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// A person that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
}

/// Audit entry for something that happened to a person.
///
/// Events copy the names instead of referencing the person row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PersonEvent {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub action: String,
}

/// An event that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPersonEvent {
    pub first_name: String,
    pub last_name: String,
    pub action: String,
}

impl NewPersonEvent {
    /// The `CREATED` event for `person`.
    pub fn created(person: &NewPerson) -> Self {
        Self {
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            action: ACTION_CREATED.to_string(),
        }
    }
}

impl Record for Person {
    type Draft = NewPerson;

    fn from_draft(draft: NewPerson, id: i32) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
        }
    }

    fn id(&self) -> i32 {
        self.id
    }
}

impl Record for PersonEvent {
    type Draft = NewPersonEvent;

    fn from_draft(draft: NewPersonEvent, id: i32) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            action: draft.action,
        }
    }

    fn id(&self) -> i32 {
        self.id
    }
}
