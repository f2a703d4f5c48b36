// Shared list-query parameters and a small WHERE-clause builder

use serde::Deserialize;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqlitePool};

use super::helpers::{escape_like, like_pattern};

pub const CONTENT_STATUSES: [&str; 3] = ["draft", "published", "archived"];

/// Query string accepted by the admin list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct AdminListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl AdminListQuery {
    /// (offset, limit) with limit clamped to 1..=100, default 50
    pub fn window(&self) -> (i64, i64) {
        (
            self.skip.unwrap_or(0).max(0),
            self.limit.unwrap_or(50).clamp(1, 100),
        )
    }
}

/// Collects `AND`-joined conditions and their string parameters
#[derive(Debug, Default)]
pub struct SqlFilter {
    clauses: Vec<String>,
    params: Vec<String>,
}

impl SqlFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Condition with a single `?` placeholder
    pub fn push(&mut self, clause: &str, param: impl Into<String>) -> &mut Self {
        self.clauses.push(clause.to_string());
        self.params.push(param.into());
        self
    }

    /// Condition without parameters
    pub fn push_raw(&mut self, clause: &str) -> &mut Self {
        self.clauses.push(clause.to_string());
        self
    }

    /// Case-insensitive substring match over any of `columns`
    pub fn push_search(&mut self, columns: &[&str], term: &str) -> &mut Self {
        if term.trim().is_empty() || columns.is_empty() {
            return self;
        }
        let pattern = like_pattern(term);
        let ors: Vec<String> = columns
            .iter()
            .map(|c| format!("LOWER(COALESCE({}, '')) LIKE ? ESCAPE '\\'", c))
            .collect();
        self.clauses.push(format!("({})", ors.join(" OR ")));
        for _ in columns {
            self.params.push(pattern.clone());
        }
        self
    }

    /// Matches rows whose JSON list column contains any of `values` (case-insensitive)
    pub fn push_json_any(&mut self, column: &str, values: &[String]) -> &mut Self {
        if values.is_empty() {
            return self;
        }
        let ors: Vec<String> = values
            .iter()
            .map(|_| format!("LOWER(COALESCE({}, '')) LIKE ? ESCAPE '\\'", column))
            .collect();
        self.clauses.push(format!("({})", ors.join(" OR ")));
        for v in values {
            self.params.push(format!("%\"{}\"%", escape_like(&v.trim().to_lowercase())));
        }
        self
    }

    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn bind_as<'q, O>(
        &self,
        mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        for p in &self.params {
            query = query.bind(p.clone());
        }
        query
    }

    pub fn bind_scalar<'q, O>(
        &self,
        mut query: QueryScalar<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryScalar<'q, Sqlite, O, SqliteArguments<'q>> {
        for p in &self.params {
            query = query.bind(p.clone());
        }
        query
    }
}

/// Adds one to `column` for every row of `table` whose id is in `ids`.
/// `table` and `column` must be compile-time names, never user input.
pub async fn increment_counter(
    pool: &SqlitePool,
    table: &'static str,
    column: &'static str,
    ids: &[String],
) -> Result<u64, sqlx::Error> {
    if ids.is_empty() {
        return Ok(0);
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "UPDATE {table} SET {column} = {column} + 1 WHERE id IN ({placeholders})"
    );
    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(id.as_str());
    }
    Ok(query.execute(pool).await?.rows_affected())
}

/// Summed counter column, 0 for an empty table
pub async fn sum_column(
    pool: &SqlitePool,
    table: &'static str,
    column: &'static str,
) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT COALESCE(SUM({column}), 0) FROM {table}");
    sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await
}

/// Whether another row of `table` already uses `slug`
pub async fn slug_taken(
    pool: &SqlitePool,
    table: &'static str,
    slug: &str,
    exclude_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM {table} WHERE slug = ? AND id != ?");
    let count: i64 = sqlx::query_scalar(&sql)
        .bind(slug)
        .bind(exclude_id.unwrap_or(""))
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Row count, optionally restricted to one status
pub async fn count_rows(
    pool: &SqlitePool,
    table: &'static str,
    status: Option<&str>,
) -> Result<i64, sqlx::Error> {
    match status {
        Some(status) => {
            let sql = format!("SELECT COUNT(*) FROM {table} WHERE status = ?");
            sqlx::query_scalar::<_, i64>(&sql)
                .bind(status)
                .fetch_one(pool)
                .await
        }
        None => {
            let sql = format!("SELECT COUNT(*) FROM {table}");
            sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await
        }
    }
}
