//! Schema bootstrap for the bundled DDL scripts.

use crate::db::DbPool;

/// Apply an idempotent DDL script.
///
/// The script may contain several statements (including `$$`-quoted
/// function bodies), so it is sent through the simple query protocol.
pub async fn apply_schema(pool: &DbPool, name: &str, ddl: &str) -> Result<(), sqlx::Error> {
    let statements = count_statements(ddl);
    sqlx::raw_sql(ddl).execute(pool).await?;

    tracing::info!(schema = %name, statements, "Schema applied");

    Ok(())
}

/// Rough statement count for logging; ignores semicolons inside `$$` bodies
/// and `--` comments.
fn count_statements(ddl: &str) -> usize {
    let mut count = 0;
    let mut in_dollar_body = false;

    for line in ddl.lines() {
        let code = line.split("--").next().unwrap_or_default();
        let mut rest = code;
        while let Some(pos) = rest.find("$$") {
            if !in_dollar_body {
                count += rest[..pos].matches(';').count();
            }
            in_dollar_body = !in_dollar_body;
            rest = &rest[pos + 2..];
        }
        if !in_dollar_body {
            count += rest.matches(';').count();
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_plain_statements() {
        let ddl = "CREATE TABLE a (id int);\nCREATE TABLE b (id int);\n";
        assert_eq!(count_statements(ddl), 2);
    }

    #[test]
    fn test_count_skips_function_bodies_and_comments() {
        let ddl = r#"
-- comment; with semicolon
CREATE OR REPLACE FUNCTION f() RETURNS trigger AS $$
BEGIN
    PERFORM pg_notify('c', NEW.x);
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;
DROP TRIGGER IF EXISTS t ON a;
"#;
        assert_eq!(count_statements(ddl), 2);
    }
}
