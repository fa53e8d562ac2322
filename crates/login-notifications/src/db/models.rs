//! Login event database model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pgdemo_common::Record;

/// A recorded login. Rows are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LoginEvent {
    /// Generated id (SERIAL)
    pub id: i32,

    /// Who logged in
    pub username: String,

    /// When the login happened
    pub login_time: DateTime<Utc>,
}

/// A login event that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoginEvent {
    pub username: String,
    pub login_time: DateTime<Utc>,
}

impl NewLoginEvent {
    /// A login by `username` happening now.
    pub fn now(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            login_time: Utc::now(),
        }
    }
}

impl Record for LoginEvent {
    type Draft = NewLoginEvent;

    fn from_draft(draft: NewLoginEvent, id: i32) -> Self {
        Self {
            id,
            username: draft.username,
            login_time: draft.login_time,
        }
    }

    fn id(&self) -> i32 {
        self.id
    }
}
