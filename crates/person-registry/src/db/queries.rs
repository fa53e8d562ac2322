//! Person and person event database queries.

use crate::db::models::{NewPerson, NewPersonEvent, Person, PersonEvent};
use pgdemo_common::db::DbPool;
use pgdemo_common::AppResult;

/// Insert a person.
pub async fn insert_person(pool: &DbPool, person: &NewPerson) -> AppResult<Person> {
    let row = sqlx::query_as::<_, Person>(
        r#"
        INSERT INTO person (first_name, last_name)
        VALUES ($1, $2)
        RETURNING id, first_name, last_name
        "#,
    )
    .bind(&person.first_name)
    .bind(&person.last_name)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// List all persons.
pub async fn list_persons(pool: &DbPool) -> AppResult<Vec<Person>> {
    let rows = sqlx::query_as::<_, Person>(
        r#"
        SELECT id, first_name, last_name
        FROM person
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List persons with the given last name.
pub async fn list_persons_by_last_name(pool: &DbPool, last_name: &str) -> AppResult<Vec<Person>> {
    let rows = sqlx::query_as::<_, Person>(
        r#"
        SELECT id, first_name, last_name
        FROM person
        WHERE last_name = $1
        ORDER BY id
        "#,
    )
    .bind(last_name)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert a person event.
pub async fn insert_person_event(pool: &DbPool, event: &NewPersonEvent) -> AppResult<PersonEvent> {
    let row = sqlx::query_as::<_, PersonEvent>(
        r#"
        INSERT INTO person_event (first_name, last_name, action)
        VALUES ($1, $2, $3)
        RETURNING id, first_name, last_name, action
        "#,
    )
    .bind(&event.first_name)
    .bind(&event.last_name)
    .bind(&event.action)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// List all person events.
pub async fn list_person_events(pool: &DbPool) -> AppResult<Vec<PersonEvent>> {
    let rows = sqlx::query_as::<_, PersonEvent>(
        r#"
        SELECT id, first_name, last_name, action
        FROM person_event
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
