use crate::models::{UrlMap, Visit, VisitCount, VisitReport};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

/// Errors surfaced by [`save_new_url`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The UNIQUE constraint on `url.slug` rejected the insert.
    #[error("slug '{0}' is already taken")]
    DuplicateSlug(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

// ── Setup ──────────────────────────────────────────────────────────────────

/// Open a SQLite pool, creating the database file if it doesn't exist yet.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(
            database_url
                .parse::<SqliteConnectOptions>()?
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .foreign_keys(true),
        )
        .await?;

    Ok(pool)
}

/// Run embedded migrations (files in migrations/).
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

// ── URLs ───────────────────────────────────────────────────────────────────

/// Look up a mapping by slug. `Ok(None)` means the slug is unknown.
pub async fn get_url_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<UrlMap>, sqlx::Error> {
    sqlx::query_as("SELECT id, slug, url FROM url WHERE slug = ?1")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// Insert a new mapping and return the stored row.
pub async fn save_new_url(pool: &SqlitePool, slug: &str, url: &str) -> Result<UrlMap, StoreError> {
    let result = sqlx::query("INSERT INTO url (slug, url) VALUES (?1, ?2)")
        .bind(slug)
        .bind(url)
        .execute(pool)
        .await;

    let id = match result {
        Ok(done) => done.last_insert_rowid(),
        Err(e) if is_unique_violation(&e) => return Err(StoreError::DuplicateSlug(slug.to_owned())),
        Err(e) => return Err(e.into()),
    };

    Ok(UrlMap {
        id,
        slug: slug.to_owned(),
        url: url.to_owned(),
    })
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

// ── Visits ─────────────────────────────────────────────────────────────────

/// Append a visit row for the mapping `url_id`.
pub async fn track_hit(
    pool: &SqlitePool,
    url_id: i64,
    device: &str,
    os: &str,
    browser: &str,
    ip: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO visit (url_id, device, os, browser, ip) VALUES (?1, ?2, ?3, ?4, ?5)")
        .bind(url_id)
        .bind(device)
        .bind(os)
        .bind(browser)
        .bind(ip)
        .execute(pool)
        .await?;

    Ok(())
}

// ── Stats ──────────────────────────────────────────────────────────────────

/// One row per mapping in creation order, including mappings never visited.
pub async fn get_visit_counts(pool: &SqlitePool) -> Result<Vec<VisitCount>, sqlx::Error> {
    sqlx::query_as(
        "SELECT u.slug, u.url, COALESCE(v.cnt, 0) AS count
         FROM url u
         LEFT JOIN (SELECT url_id, COUNT(*) AS cnt FROM visit GROUP BY url_id) v
                ON v.url_id = u.id
         ORDER BY u.id",
    )
    .fetch_all(pool)
    .await
}

/// Fetch a mapping and all of its visits, newest first.
pub async fn get_visits(pool: &SqlitePool, slug: &str) -> Result<Option<VisitReport>, sqlx::Error> {
    let url = match get_url_by_slug(pool, slug).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    let visits: Vec<Visit> = sqlx::query_as(
        "SELECT id, url_id, device, os, browser, ip, created_at
         FROM visit
         WHERE url_id = ?1
         ORDER BY id DESC",
    )
    .bind(url.id)
    .fetch_all(pool)
    .await?;

    Ok(Some(VisitReport { url, visits }))
}
