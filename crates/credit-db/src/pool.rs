use crate::error::DbResult;
use sqlx::{Any, Pool, any::AnyPoolOptions};
use tracing::debug;

const INITIAL_MIGRATION: &str = include_str!("../migrations/001_initial.sql");

/// Create a database pool from a connection string
pub async fn create_pool(database_url: &str, max_connections: u32) -> DbResult<Pool<Any>> {
    let pool = AnyPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Run migrations on the database
///
/// The `Any` driver executes one statement per query, so the migration file
/// is split on `;` and applied statement by statement.
pub async fn run_migrations(pool: &Pool<Any>) -> DbResult<()> {
    for statement in migration_statements(INITIAL_MIGRATION) {
        debug!("Applying migration statement: {}", statement);
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

fn migration_statements(sql: &str) -> impl Iterator<Item = &str> {
    sql.split(';')
        .map(str::trim)
        .filter(|s| s.lines().any(|line| !line.trim().is_empty() && !line.trim().starts_with("--")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_statements() {
        let statements: Vec<&str> = migration_statements(INITIAL_MIGRATION).collect();
        assert_eq!(statements.len(), 4);
        assert!(statements[0].starts_with("CREATE TABLE IF NOT EXISTS articles"));
        assert!(statements[3].contains("article_votes"));
    }

    #[test]
    fn test_migration_statements_skips_comment_only_chunks() {
        let sql = "CREATE TABLE a (x INTEGER);\n-- trailing note\n;\n";
        let statements: Vec<&str> = migration_statements(sql).collect();
        assert_eq!(statements, vec!["CREATE TABLE a (x INTEGER)"]);
    }

    #[tokio::test]
    async fn test_create_pool_sqlite() {
        // Install the SQLite driver for Any
        sqlx::any::install_default_drivers();

        let pool = create_pool("sqlite::memory:", 1)
            .await
            .expect("Failed to create pool");

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .expect("Failed to execute query");
    }

    #[tokio::test]
    async fn test_run_migrations_is_repeatable() {
        sqlx::any::install_default_drivers();

        let pool = create_pool("sqlite::memory:", 1)
            .await
            .expect("Failed to create pool");

        run_migrations(&pool).await.expect("First migration failed");
        run_migrations(&pool).await.expect("Second migration failed");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM article_votes")
            .fetch_one(&pool)
            .await
            .expect("article_votes table missing");
        assert_eq!(count.0, 0);
    }
}
