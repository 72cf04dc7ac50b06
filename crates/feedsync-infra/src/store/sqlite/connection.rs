use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr, Schema};

use super::entity::{post, post_comment, post_page};

/// Configuration for the SQLite cache database.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// SeaORM connection URL (e.g., sqlite://feedsync.db?mode=rwc)
    pub url: String,
    /// Pool size. Must be 1 for `sqlite::memory:`, where every connection
    /// opens its own database.
    pub max_connections: u32,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://feedsync.db?mode=rwc".to_string(),
            max_connections: 4,
        }
    }
}

impl SqliteConfig {
    /// A private in-memory database, mostly for tests.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("LOCAL_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://feedsync.db?mode=rwc".to_string()),
            max_connections: std::env::var("LOCAL_DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4),
        }
    }
}

/// Open the pool and make sure the cache tables exist.
pub(super) async fn connect(config: &SqliteConfig) -> Result<DbConn, DbErr> {
    tracing::info!(url = %config.url, "Opening local cache database");

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false)
        .to_owned();

    let db = Database::connect(opts).await?;
    create_tables(&db).await?;

    tracing::info!(
        "Local cache database ready (pool: {})",
        config.max_connections
    );
    Ok(db)
}

/// `CREATE TABLE IF NOT EXISTS` for every cache entity. There are no
/// migrations; the schema is whatever the entities declare.
async fn create_tables(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let statements = [
        schema
            .create_table_from_entity(post::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(post_page::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(post_comment::Entity)
            .if_not_exists()
            .to_owned(),
    ];

    for statement in &statements {
        db.execute(backend.build(statement)).await?;
    }

    Ok(())
}
