// src/services/expiration.rs
//! Background sweeper for stale content.
//!
//! Listings (jobs, internships) past their `application_deadline` are archived;
//! any job, internship, article or roadmap past its `expiration_date` is deleted.
//! Both steps filter on canonical RFC 3339 strings, so re-running a sweep is a no-op.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::common::helpers::format_timestamp;
use crate::services::monitoring;

pub const EXPIRED_REASON: &str = "Expired - Application deadline passed";

const LISTING_TABLES: [&str; 2] = ["jobs", "internships"];

/// Rows touched by one sweep
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ExpirationReport {
    pub expired_jobs: u64,
    pub deleted_jobs: u64,
    pub expired_internships: u64,
    pub deleted_internships: u64,
    pub deleted_articles: u64,
    pub deleted_roadmaps: u64,
}

impl ExpirationReport {
    pub fn total(&self) -> u64 {
        self.expired_jobs
            + self.deleted_jobs
            + self.expired_internships
            + self.deleted_internships
            + self.deleted_articles
            + self.deleted_roadmaps
    }
}

#[derive(Debug, Clone)]
pub struct ExpirationConfig {
    pub check_interval: Duration,
    pub retry_delay: Duration,
}

impl Default for ExpirationConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(3600),
            retry_delay: Duration::from_secs(60),
        }
    }
}

impl ExpirationConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secs = |key: &str| env::var(key).ok().and_then(|v| v.parse::<u64>().ok());

        Self {
            check_interval: secs("EXPIRATION_CHECK_INTERVAL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.check_interval),
            retry_delay: secs("EXPIRATION_RETRY_DELAY_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.retry_delay),
        }
    }
}

#[derive(Debug)]
pub struct ExpirationService {
    pool: SqlitePool,
    config: ExpirationConfig,
}

impl ExpirationService {
    pub fn new(pool: SqlitePool, config: ExpirationConfig) -> Self {
        Self { pool, config }
    }

    /// One sweep against the current time
    pub async fn run_once(&self) -> Result<ExpirationReport, sqlx::Error> {
        self.run_at(Utc::now()).await
    }

    /// One sweep treating `now` as the current time
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<ExpirationReport, sqlx::Error> {
        let now = format_timestamp(&now);

        let expired_jobs = self.archive_past_deadline(LISTING_TABLES[0], &now).await?;
        let expired_internships = self.archive_past_deadline(LISTING_TABLES[1], &now).await?;

        let report = ExpirationReport {
            expired_jobs,
            expired_internships,
            deleted_jobs: self.delete_expired("jobs", &now).await?,
            deleted_internships: self.delete_expired("internships", &now).await?,
            deleted_articles: self.delete_expired("articles", &now).await?,
            deleted_roadmaps: self.delete_expired("roadmaps", &now).await?,
        };

        if report.total() > 0 {
            info!(
                expired_jobs = report.expired_jobs,
                deleted_jobs = report.deleted_jobs,
                expired_internships = report.expired_internships,
                deleted_internships = report.deleted_internships,
                deleted_articles = report.deleted_articles,
                deleted_roadmaps = report.deleted_roadmaps,
                "Expiration sweep completed"
            );
        } else {
            debug!("Expiration sweep found nothing to do");
        }

        Ok(report)
    }

    async fn archive_past_deadline(&self, table: &str, now: &str) -> Result<u64, sqlx::Error> {
        let sql = format!(
            "UPDATE {} SET status = 'archived', updated_at = ?, archived_reason = ? \
             WHERE application_deadline IS NOT NULL AND application_deadline < ? \
             AND status != 'archived'",
            table
        );
        let result = sqlx::query(&sql)
            .bind(now)
            .bind(EXPIRED_REASON)
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, table: &str, now: &str) -> Result<u64, sqlx::Error> {
        let sql = format!(
            "DELETE FROM {} WHERE expiration_date IS NOT NULL AND expiration_date < ?",
            table
        );
        let result = sqlx::query(&sql).bind(now).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Starts the sweeper loop on the runtime. Sleeps `check_interval` after a
    /// sweep and `retry_delay` after a failed one.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                interval_secs = self.config.check_interval.as_secs(),
                "Expiration checker started"
            );
            loop {
                let outcome = self.run_once().await;
                if let Err(e) = &outcome {
                    error!(error = %e, "Expiration sweep failed");
                    monitoring::capture_error(e);
                }
                tokio::time::sleep(next_delay(&self.config, &outcome)).await;
            }
        })
    }
}

/// How long the sweeper waits after a sweep with this outcome
pub fn next_delay<T, E>(config: &ExpirationConfig, outcome: &Result<T, E>) -> Duration {
    match outcome {
        Ok(_) => config.check_interval,
        Err(_) => config.retry_delay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::migrations::run_migrations;
    use chrono::TimeZone;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup() -> (SqlitePool, ExpirationService) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        let service = ExpirationService::new(pool.clone(), ExpirationConfig::default());
        (pool, service)
    }

    async fn insert_job(
        pool: &SqlitePool,
        id: &str,
        status: &str,
        deadline: Option<&str>,
        expiration: Option<&str>,
    ) {
        sqlx::query(
            "INSERT INTO jobs (id, title, company, description, location, job_type, experience_level, \
             status, application_deadline, expiration_date, created_at, updated_at) \
             VALUES (?, 'Engineer', 'Acme', 'Build things', 'Pune', 'full-time', 'fresher', ?, ?, ?, \
             '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
        )
        .bind(id)
        .bind(status)
        .bind(deadline)
        .bind(expiration)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn insert_article(pool: &SqlitePool, id: &str, expiration: Option<&str>) {
        sqlx::query(
            "INSERT INTO articles (id, title, slug, excerpt, content, category, status, expiration_date, \
             created_at, updated_at) VALUES (?, 'T', ?, 'e', 'c', 'career', 'published', ?, \
             '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
        )
        .bind(id)
        .bind(id)
        .bind(expiration)
        .execute(pool)
        .await
        .unwrap();
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_archives_listings_past_deadline() {
        let (pool, service) = setup().await;
        insert_job(&pool, "J_PAST", "published", Some("2024-05-31T23:59:59Z"), None).await;
        insert_job(&pool, "J_FUTURE", "published", Some("2024-06-02T00:00:00Z"), None).await;
        insert_job(&pool, "J_NODEADLINE", "draft", None, None).await;
        insert_job(&pool, "J_ARCHIVED", "archived", Some("2024-01-01T00:00:00Z"), None).await;

        let report = service.run_at(now()).await.unwrap();
        assert_eq!(report.expired_jobs, 1);
        assert_eq!(report.deleted_jobs, 0);

        let (status, reason, updated_at): (String, Option<String>, String) = sqlx::query_as(
            "SELECT status, archived_reason, updated_at FROM jobs WHERE id = 'J_PAST'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(status, "archived");
        assert_eq!(reason.as_deref(), Some(EXPIRED_REASON));
        assert_eq!(updated_at, "2024-06-01T12:00:00Z");

        let future_status: String =
            sqlx::query_scalar("SELECT status FROM jobs WHERE id = 'J_FUTURE'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(future_status, "published");
    }

    #[tokio::test]
    async fn test_deletes_content_past_expiration() {
        let (pool, service) = setup().await;
        insert_job(&pool, "J_GONE", "published", None, Some("2024-05-01T00:00:00Z")).await;
        insert_job(&pool, "J_STAYS", "published", None, Some("2024-07-01T00:00:00Z")).await;
        insert_article(&pool, "A_GONE", Some("2024-06-01T11:59:59Z")).await;
        insert_article(&pool, "A_STAYS", None).await;

        let report = service.run_at(now()).await.unwrap();
        assert_eq!(
            report,
            ExpirationReport {
                deleted_jobs: 1,
                deleted_articles: 1,
                ..Default::default()
            }
        );

        let remaining: Vec<String> = sqlx::query_scalar("SELECT id FROM jobs ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, vec!["J_STAYS"]);
        let articles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(articles, 1);
    }

    #[tokio::test]
    async fn test_second_sweep_is_a_no_op() {
        let (pool, service) = setup().await;
        insert_job(&pool, "J_PAST", "published", Some("2024-05-01T00:00:00Z"), None).await;
        insert_job(&pool, "J_GONE", "draft", None, Some("2024-05-01T00:00:00Z")).await;

        let first = service.run_at(now()).await.unwrap();
        assert_eq!(first.total(), 2);

        let second = service.run_at(now()).await.unwrap();
        assert_eq!(second, ExpirationReport::default());
    }

    #[tokio::test]
    async fn test_sweep_fails_without_schema() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let service = ExpirationService::new(pool, ExpirationConfig::default());
        assert!(service.run_once().await.is_err());
    }

    async fn insert_internship(
        pool: &SqlitePool,
        id: &str,
        status: &str,
        deadline: Option<&str>,
        expiration: Option<&str>,
    ) {
        sqlx::query(
            "INSERT INTO internships (id, title, company, description, location, status, \
             application_deadline, expiration_date, created_at, updated_at) \
             VALUES (?, 'Intern', 'Acme', 'Learn things', 'Remote', ?, ?, ?, \
             '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
        )
        .bind(id)
        .bind(status)
        .bind(deadline)
        .bind(expiration)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn insert_roadmap(pool: &SqlitePool, id: &str, expiration: Option<&str>) {
        sqlx::query(
            "INSERT INTO roadmaps (id, title, slug, description, difficulty_level, status, \
             expiration_date, created_at, updated_at) VALUES (?, 'Backend', ?, 'd', 'beginner', \
             'published', ?, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
        )
        .bind(id)
        .bind(id)
        .bind(expiration)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_sweeps_internships_and_roadmaps() {
        let (pool, service) = setup().await;
        insert_internship(&pool, "I_PAST", "published", Some("2024-05-15"), None).await;
        insert_internship(&pool, "I_OPEN", "published", Some("2024-06-30"), None).await;
        insert_internship(&pool, "I_GONE", "draft", None, Some("2024-05-01T00:00:00Z")).await;
        insert_roadmap(&pool, "R_GONE", Some("2024-06-01T11:00:00Z")).await;
        insert_roadmap(&pool, "R_STAYS", Some("2024-12-01T00:00:00Z")).await;
        insert_roadmap(&pool, "R_FOREVER", None).await;

        let report = service.run_at(now()).await.unwrap();
        assert_eq!(
            report,
            ExpirationReport {
                expired_internships: 1,
                deleted_internships: 1,
                deleted_roadmaps: 1,
                ..Default::default()
            }
        );

        let internships: Vec<(String, String)> =
            sqlx::query_as("SELECT id, status FROM internships ORDER BY id")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(
            internships,
            vec![
                ("I_OPEN".to_string(), "published".to_string()),
                ("I_PAST".to_string(), "archived".to_string()),
            ]
        );
        let roadmaps: Vec<String> = sqlx::query_scalar("SELECT id FROM roadmaps ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(roadmaps, vec!["R_FOREVER", "R_STAYS"]);
    }

    #[tokio::test]
    async fn test_no_past_dates_survive_a_sweep() {
        let (pool, service) = setup().await;
        insert_job(&pool, "J_1", "published", Some("2024-05-01T00:00:00Z"), Some("2024-05-02T00:00:00Z")).await;
        insert_job(&pool, "J_2", "draft", Some("2024-05-20T00:00:00Z"), None).await;
        insert_internship(&pool, "I_1", "published", Some("2024-01-01T00:00:00Z"), None).await;
        insert_internship(&pool, "I_2", "published", None, Some("2024-03-01T00:00:00Z")).await;
        insert_article(&pool, "A_1", Some("2024-02-01T00:00:00Z")).await;
        insert_roadmap(&pool, "R_1", Some("2024-02-01T00:00:00Z")).await;

        service.run_at(now()).await.unwrap();

        let cutoff = "2024-06-01T12:00:00Z";
        for table in ["jobs", "internships", "articles", "roadmaps"] {
            let expired: i64 = sqlx::query_scalar(&format!(
                "SELECT COUNT(*) FROM {} WHERE expiration_date IS NOT NULL AND expiration_date < ?",
                table
            ))
            .bind(cutoff)
            .fetch_one(&pool)
            .await
            .unwrap();
            assert_eq!(expired, 0, "{}", table);
        }
        for table in ["jobs", "internships"] {
            let open_past_deadline: i64 = sqlx::query_scalar(&format!(
                "SELECT COUNT(*) FROM {} WHERE application_deadline < ? AND status != 'archived'",
                table
            ))
            .bind(cutoff)
            .fetch_one(&pool)
            .await
            .unwrap();
            assert_eq!(open_past_deadline, 0, "{}", table);
        }
    }

    #[test]
    fn test_next_delay_retries_sooner_after_failure() {
        let config = ExpirationConfig {
            check_interval: Duration::from_secs(3600),
            retry_delay: Duration::from_secs(60),
        };
        let ok: Result<ExpirationReport, sqlx::Error> = Ok(ExpirationReport::default());
        let failed: Result<ExpirationReport, sqlx::Error> = Err(sqlx::Error::PoolTimedOut);

        assert_eq!(next_delay(&config, &ok), Duration::from_secs(3600));
        assert_eq!(next_delay(&config, &failed), Duration::from_secs(60));
    }

    #[test]
    fn test_default_schedule_is_hourly_with_one_minute_retry() {
        let config = ExpirationConfig::default();
        assert_eq!(config.check_interval, Duration::from_secs(3600));
        assert_eq!(config.retry_delay, Duration::from_secs(60));
    }
}
