use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    if DB_CONN.get().is_some() {
        return Ok(());
    }

    let db_file = db_path.unwrap_or("target/db/recipes.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Ensure required tables exist (minimal schema bootstrap).
///
/// The recipe aggregate is stored as one row per recipe: scalar columns plus
/// the full ingredient collection in `ingredients_json`.
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    if !table_exists(conn, "recipe").await? {
        tracing::info!("Creating recipe table");
        let create_recipe_table_sql = r#"
            CREATE TABLE recipe (
                id TEXT PRIMARY KEY NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                ingredients_json TEXT NOT NULL DEFAULT '[]',
                created_at TEXT,
                updated_at TEXT
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_recipe_table_sql.to_string(),
        ))
        .await?;
    }

    if !table_exists(conn, "unit_of_measure").await? {
        tracing::info!("Creating unit_of_measure table");
        let create_uom_table_sql = r#"
            CREATE TABLE unit_of_measure (
                id TEXT PRIMARY KEY NOT NULL,
                description TEXT NOT NULL
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_uom_table_sql.to_string(),
        ))
        .await?;
    }

    Ok(())
}

async fn table_exists(conn: &DatabaseConnection, table: &str) -> anyhow::Result<bool> {
    let check = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        table
    );
    let rows = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
        .await?;
    Ok(!rows.is_empty())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Process-wide database for tests. Safe to call from every test; the first
/// caller wins and later calls are no-ops. A per-process temp file is used
/// instead of `:memory:` because each test runs on its own tokio runtime and
/// the pool may drop and reopen its connection between runtimes — a reopened
/// `:memory:` connection would be a fresh, empty database. The pool is capped
/// at a single connection so test writes are serialized.
#[cfg(test)]
pub async fn initialize_test_database() -> anyhow::Result<()> {
    static TEST_DB_INIT: tokio::sync::OnceCell<()> = tokio::sync::OnceCell::const_new();
    TEST_DB_INIT
        .get_or_try_init(|| async {
            if DB_CONN.get().is_some() {
                return Ok(());
            }

            let db_file = std::env::temp_dir().join(format!(
                "backend-test-{}-{}.db",
                std::process::id(),
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_nanos())
                    .unwrap_or_default()
            ));
            let db_url = format!(
                "sqlite://{}?mode=rwc",
                db_file.to_string_lossy().replace('\\', "/")
            );
            let mut options = sea_orm::ConnectOptions::new(db_url);
            options.max_connections(1);
            let conn = Database::connect(options).await?;

            bootstrap_schema(&conn).await?;

            // a concurrent test may have set the connection first; theirs is
            // bootstrapped the same way, so losing the race is fine
            let _ = DB_CONN.set(conn);
            Ok(())
        })
        .await
        .map(|_: &()| ())
}
