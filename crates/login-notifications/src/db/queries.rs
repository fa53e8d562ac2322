//! Login event database queries.

use crate::db::models::{LoginEvent, NewLoginEvent};
use pgdemo_common::db::DbPool;
use pgdemo_common::AppResult;

/// Insert a login event and return the stored row.
pub async fn insert_login_event(pool: &DbPool, event: &NewLoginEvent) -> AppResult<LoginEvent> {
    let row = sqlx::query_as::<_, LoginEvent>(
        r#"
        INSERT INTO login_event (username, login_time)
        VALUES ($1, $2)
        RETURNING id, username, login_time
        "#,
    )
    .bind(&event.username)
    .bind(event.login_time)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// List all login events, oldest first.
pub async fn list_login_events(pool: &DbPool) -> AppResult<Vec<LoginEvent>> {
    let rows = sqlx::query_as::<_, LoginEvent>(
        r#"
        SELECT id, username, login_time
        FROM login_event
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List login events for one user, oldest first.
pub async fn list_login_events_by_username(
    pool: &DbPool,
    username: &str,
) -> AppResult<Vec<LoginEvent>> {
    let rows = sqlx::query_as::<_, LoginEvent>(
        r#"
        SELECT id, username, login_time
        FROM login_event
        WHERE username = $1
        ORDER BY id
        "#,
    )
    .bind(username)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
