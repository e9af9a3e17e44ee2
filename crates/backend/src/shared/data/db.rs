use std::path::Path;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

/// Open (or create) the SQLite database file and make sure the schema exists.
///
/// The returned connection is owned by the caller and handed to handlers
/// through the application state.
pub async fn connect(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = db_file.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options).await?;

    bootstrap_schema(&conn).await?;
    tracing::info!("Database ready at {}", db_file.display());
    Ok(conn)
}

/// Private in-memory database with the full schema
///
/// A single pooled connection: every SQLite `:memory:` connection is a
/// separate database.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

const SCHEMA: &[(&str, &str)] = &[
    (
        "a001_product",
        r#"
        CREATE TABLE IF NOT EXISTS a001_product (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0,
            stock_quantity INTEGER NOT NULL DEFAULT 0 CHECK (stock_quantity >= 0),
            in_stock INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            image_url TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "idx_a001_product_category",
        "CREATE INDEX IF NOT EXISTS idx_a001_product_category ON a001_product (category, is_deleted);",
    ),
    (
        "a002_order",
        r#"
        CREATE TABLE IF NOT EXISTS a002_order (
            id TEXT PRIMARY KEY NOT NULL,
            product_id TEXT NOT NULL,
            product_name TEXT NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            total_price REAL NOT NULL,
            customer_name TEXT NOT NULL,
            customer_phone TEXT NOT NULL,
            customer_address TEXT NOT NULL,
            regional_board TEXT NOT NULL,
            local_board TEXT NOT NULL,
            sub_local_board TEXT,
            order_status TEXT NOT NULL DEFAULT 'pending',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "idx_a002_order_product",
        "CREATE INDEX IF NOT EXISTS idx_a002_order_product ON a002_order (product_id);",
    ),
];

/// Ensure required tables exist (minimal schema bootstrap)
pub async fn bootstrap_schema<C: ConnectionTrait>(conn: &C) -> anyhow::Result<()> {
    for (name, sql) in SCHEMA {
        tracing::debug!("Ensuring schema object {}", name);
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }
    Ok(())
}
