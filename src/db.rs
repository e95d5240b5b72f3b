use crate::config::AppConfig;
use sqlx::migrate::MigrateDatabase;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

const TABLE_DDL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS posts (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255),
        content TEXT,
        image_location VARCHAR(255),
        views INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        image_id VARCHAR(50) UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS comments (
        id BIGSERIAL PRIMARY KEY,
        post_id BIGINT NOT NULL REFERENCES posts(id),
        author VARCHAR(100),
        content TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS social_media_links (
        id BIGSERIAL PRIMARY KEY,
        url VARCHAR(255),
        name VARCHAR(100),
        icon VARCHAR(255)
    )",
    "CREATE TABLE IF NOT EXISTS site_icons (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100),
        icon VARCHAR(255)
    )",
];

/// Build the shared pool. Connections are established lazily so startup
/// never blocks on the database; bootstrap is where reachability surfaces.
pub fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect_lazy(&config.database_url)
}

/// Ensure the database and its tables exist. Every statement uses
/// "if not exists" semantics, so running this on each startup is
/// side-effect-free. No retries.
pub async fn bootstrap(pool: &PgPool, database_url: &str) -> anyhow::Result<()> {
    if !Postgres::database_exists(database_url).await? {
        Postgres::create_database(database_url).await?;
        tracing::info!("database created");
    }

    for ddl in TABLE_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!("schema bootstrap complete");

    Ok(())
}
