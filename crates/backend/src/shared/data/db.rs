use chrono::Utc;
use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Формат временных меток в TEXT-колонках (сравнимы лексикографически)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Схема БД. Все операторы идемпотентны, выполняются при каждом старте.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS registered_assets (
        id TEXT PRIMARY KEY NOT NULL,
        asset_serial_no TEXT NOT NULL UNIQUE,
        asset_make TEXT,
        asset_model TEXT,
        vendor TEXT,
        warranty_end_date TEXT,
        registration_date TEXT,
        created_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS asset_issues (
        id TEXT PRIMARY KEY NOT NULL,
        employee_code TEXT NOT NULL,
        employee_name TEXT NOT NULL,
        department TEXT,
        designation TEXT,
        location TEXT,
        phone_number TEXT,
        email_id TEXT,
        hod_name TEXT,
        asset_type TEXT,
        asset_code TEXT,
        make_model TEXT,
        serial_number TEXT NOT NULL UNIQUE,
        hostname TEXT,
        ip_address TEXT,
        old_laptop_serial TEXT,
        issue_date_manual TEXT,
        created_at TEXT NOT NULL,
        previous_employee_code TEXT,
        last_transfer_date TEXT,
        operating_system TEXT,
        printer_configured TEXT,
        ms_office_version TEXT,
        windows_update TEXT,
        licensed_software_name TEXT,
        local_admin_rights_removed TEXT,
        antivirus TEXT,
        local_admin_pass_set TEXT,
        sap_configured TEXT,
        backup_configured TEXT,
        seven_zip TEXT,
        chrome TEXT,
        onedrive_configured TEXT,
        laptop_bag TEXT,
        rmm_agent TEXT,
        cleaned TEXT,
        physical_condition TEXT,
        asset_tag TEXT
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_asset_issues_created_at ON asset_issues (created_at);",
    r#"
    CREATE TABLE IF NOT EXISTS system_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        category TEXT NOT NULL,
        subject TEXT NOT NULL,
        message TEXT NOT NULL
    );
    "#,
];

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening database: {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;
    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Create tables and indexes that do not exist yet
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for sql in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

pub fn get_connection() -> anyhow::Result<&'static DatabaseConnection> {
    DB_CONN
        .get()
        .ok_or_else(|| anyhow::anyhow!("Database connection has not been initialized"))
}

/// Current UTC time in `TIMESTAMP_FORMAT`
pub fn now_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Подстрока без учёта регистра, включая не-ASCII буквы.
///
/// SQLite `LOWER` складывает только ASCII, поэтому текстовые фильтры
/// применяются здесь, а не в SQL.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Fresh in-memory database with the full schema.
///
/// A single pooled connection keeps every query on the same SQLite memory db.
#[cfg(test)]
pub async fn connect_in_memory() -> DatabaseConnection {
    use sea_orm::ConnectOptions;

    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await.unwrap();
    bootstrap_schema(&conn).await.unwrap();
    conn
}
