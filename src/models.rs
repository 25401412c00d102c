use chrono::NaiveDateTime;

/// A short URL mapping from the `url` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlMap {
    pub id: i64,
    pub slug: String,
    pub url: String,
}

/// A single recorded redirect from the `visit` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Visit {
    pub id: i64,
    pub url_id: i64,
    pub device: String,
    pub os: String,
    pub browser: String,
    pub ip: String,
    pub created_at: NaiveDateTime,
}

/// A mapping joined with its aggregated visit count, used on the stats page.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VisitCount {
    pub slug: String,
    pub url: String,
    pub count: i64,
}

/// Everything shown on the per-slug stats page.
#[derive(Debug, Clone)]
pub struct VisitReport {
    pub url: UrlMap,
    /// Most recent first.
    pub visits: Vec<Visit>,
}
