// src/common/migrations.rs
//! Database schema management
//!
//! Tables are created with `CREATE TABLE IF NOT EXISTS`; setting `RESET_DB=true`
//! drops everything first. List and nested fields live in TEXT columns as JSON,
//! and every date column holds an RFC 3339 UTC string (see `helpers::format_timestamp`).

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

/// Run all database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let should_reset_db = env::var("RESET_DB").unwrap_or_else(|_| "false".to_string()) == "true";

    if should_reset_db {
        warn!("RESET_DB=true - dropping all tables and recreating schema");
        drop_all_tables(pool).await?;
    }

    create_account_tables(pool).await?;
    create_listing_tables(pool).await?;
    create_editorial_tables(pool).await?;
    create_dsa_tables(pool).await?;
    create_engagement_tables(pool).await?;
    create_portfolio_tables(pool).await?;
    create_system_tables(pool).await?;
    create_indexes(pool).await?;

    info!("Database migration completed");
    Ok(())
}

async fn drop_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let tables = [
        "portfolios",
        "portfolio_templates",
        "pages",
        "interactions",
        "dsa_discussions",
        "dsa_user_progress",
        "dsa_submissions",
        "dsa_problems",
        "dsa_topics",
        "dsa_categories",
        "roadmaps",
        "articles",
        "internships",
        "jobs",
        "users",
        "admin_users",
        "system_settings",
    ];

    for table in tables {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }
    info!("Dropped old tables");
    Ok(())
}

async fn create_account_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admin_users (
            id TEXT PRIMARY KEY,
            username TEXT UNIQUE NOT NULL,
            email TEXT UNIQUE NOT NULL,
            hashed_password TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_superuser INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            last_login TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT UNIQUE NOT NULL,
            name TEXT,
            google_id TEXT,
            picture TEXT,
            created_at TEXT,
            last_login TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_listing_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            company TEXT NOT NULL,
            company_logo TEXT,
            description TEXT NOT NULL,
            requirements TEXT,
            responsibilities TEXT,
            location TEXT NOT NULL,
            salary_min INTEGER,
            salary_max INTEGER,
            salary_currency TEXT NOT NULL DEFAULT 'INR',
            job_type TEXT NOT NULL,
            experience_level TEXT NOT NULL,
            skills_required TEXT,
            benefits TEXT,
            application_url TEXT,
            application_deadline TEXT,
            is_remote INTEGER NOT NULL DEFAULT 0,
            tags TEXT,
            status TEXT NOT NULL DEFAULT 'draft',
            archived_reason TEXT,
            expiration_date TEXT,
            views INTEGER NOT NULL DEFAULT 0,
            applications INTEGER NOT NULL DEFAULT 0,
            created_by TEXT NOT NULL DEFAULT 'admin',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS internships (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            company TEXT NOT NULL,
            company_logo TEXT,
            description TEXT NOT NULL,
            requirements TEXT,
            responsibilities TEXT,
            location TEXT NOT NULL,
            stipend INTEGER,
            duration_months INTEGER NOT NULL DEFAULT 3,
            skills_required TEXT,
            benefits TEXT,
            application_url TEXT,
            application_deadline TEXT,
            is_remote INTEGER NOT NULL DEFAULT 0,
            tags TEXT,
            status TEXT NOT NULL DEFAULT 'draft',
            archived_reason TEXT,
            expiration_date TEXT,
            views INTEGER NOT NULL DEFAULT 0,
            applications INTEGER NOT NULL DEFAULT 0,
            created_by TEXT NOT NULL DEFAULT 'admin',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_editorial_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS articles (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            slug TEXT UNIQUE NOT NULL,
            excerpt TEXT NOT NULL,
            content TEXT NOT NULL,
            featured_image TEXT,
            category TEXT NOT NULL,
            tags TEXT,
            reading_time_minutes INTEGER,
            seo_meta_title TEXT,
            seo_meta_description TEXT,
            author TEXT,
            status TEXT NOT NULL DEFAULT 'draft',
            expiration_date TEXT,
            views INTEGER NOT NULL DEFAULT 0,
            likes INTEGER NOT NULL DEFAULT 0,
            created_by TEXT NOT NULL DEFAULT 'admin',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS roadmaps (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            slug TEXT UNIQUE NOT NULL,
            description TEXT NOT NULL,
            featured_image TEXT,
            difficulty_level TEXT NOT NULL,
            estimated_completion_time TEXT,
            tags TEXT,
            steps TEXT,
            prerequisites TEXT,
            status TEXT NOT NULL DEFAULT 'draft',
            expiration_date TEXT,
            views INTEGER NOT NULL DEFAULT 0,
            enrollments INTEGER NOT NULL DEFAULT 0,
            created_by TEXT NOT NULL DEFAULT 'admin',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pages (
            id TEXT PRIMARY KEY,
            slug TEXT UNIQUE NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            meta_description TEXT,
            status TEXT NOT NULL DEFAULT 'published',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_dsa_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dsa_categories (
            id TEXT PRIMARY KEY,
            name TEXT UNIQUE NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dsa_topics (
            id TEXT PRIMARY KEY,
            category_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL,
            FOREIGN KEY(category_id) REFERENCES dsa_categories(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dsa_problems (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            slug TEXT UNIQUE NOT NULL,
            description TEXT NOT NULL,
            difficulty TEXT NOT NULL,
            category_id TEXT,
            topic_id TEXT,
            tags TEXT,
            examples TEXT,
            constraints TEXT,
            hints TEXT,
            test_cases TEXT,
            solution_approach TEXT,
            time_complexity TEXT,
            space_complexity TEXT,
            status TEXT NOT NULL DEFAULT 'draft',
            expiration_date TEXT,
            attempts INTEGER NOT NULL DEFAULT 0,
            solved_count INTEGER NOT NULL DEFAULT 0,
            created_by TEXT NOT NULL DEFAULT 'admin',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dsa_submissions (
            id TEXT PRIMARY KEY,
            problem_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            code TEXT NOT NULL,
            language TEXT NOT NULL,
            status TEXT NOT NULL,
            test_cases_passed INTEGER NOT NULL DEFAULT 0,
            total_test_cases INTEGER NOT NULL DEFAULT 0,
            submitted_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dsa_user_progress (
            user_id TEXT NOT NULL,
            problem_id TEXT NOT NULL,
            status TEXT NOT NULL,
            attempts INTEGER NOT NULL DEFAULT 0,
            best_solution TEXT,
            best_language TEXT,
            last_attempted TEXT,
            solved_at TEXT,
            PRIMARY KEY(user_id, problem_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dsa_discussions (
            id TEXT PRIMARY KEY,
            problem_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            user_name TEXT NOT NULL,
            content TEXT NOT NULL,
            is_solution INTEGER NOT NULL DEFAULT 0,
            parent_id TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_engagement_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interactions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            content_type TEXT NOT NULL,
            content_id TEXT NOT NULL,
            kind TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(user_id, content_type, content_id, kind)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_portfolio_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS portfolio_templates (
            id TEXT PRIMARY KEY,
            name TEXT UNIQUE NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            preview_image TEXT,
            colors TEXT NOT NULL,
            sections TEXT NOT NULL,
            html TEXT NOT NULL,
            css TEXT NOT NULL,
            js TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS portfolios (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            template_id TEXT NOT NULL,
            title TEXT NOT NULL,
            data TEXT NOT NULL,
            generated_html TEXT NOT NULL,
            share_token TEXT UNIQUE NOT NULL,
            is_public INTEGER NOT NULL DEFAULT 1,
            views INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_system_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS system_settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            description TEXT,
            updated_at TEXT DEFAULT (datetime('now')),
            updated_by TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_jobs_status ON jobs(status, created_at)",
        "CREATE INDEX IF NOT EXISTS idx_jobs_deadline ON jobs(application_deadline)",
        "CREATE INDEX IF NOT EXISTS idx_jobs_expiration ON jobs(expiration_date)",
        "CREATE INDEX IF NOT EXISTS idx_jobs_company ON jobs(company)",
        "CREATE INDEX IF NOT EXISTS idx_internships_status ON internships(status, created_at)",
        "CREATE INDEX IF NOT EXISTS idx_internships_deadline ON internships(application_deadline)",
        "CREATE INDEX IF NOT EXISTS idx_internships_expiration ON internships(expiration_date)",
        "CREATE INDEX IF NOT EXISTS idx_articles_status ON articles(status, created_at)",
        "CREATE INDEX IF NOT EXISTS idx_articles_expiration ON articles(expiration_date)",
        "CREATE INDEX IF NOT EXISTS idx_roadmaps_status ON roadmaps(status, created_at)",
        "CREATE INDEX IF NOT EXISTS idx_roadmaps_expiration ON roadmaps(expiration_date)",
        "CREATE INDEX IF NOT EXISTS idx_dsa_problems_filters ON dsa_problems(status, difficulty)",
        "CREATE INDEX IF NOT EXISTS idx_dsa_submissions_user ON dsa_submissions(user_id, problem_id, submitted_at)",
        "CREATE INDEX IF NOT EXISTS idx_dsa_discussions_problem ON dsa_discussions(problem_id, parent_id)",
        "CREATE INDEX IF NOT EXISTS idx_interactions_user ON interactions(user_id, kind)",
        "CREATE INDEX IF NOT EXISTS idx_interactions_content ON interactions(content_type, content_id, kind)",
        "CREATE INDEX IF NOT EXISTS idx_portfolios_user ON portfolios(user_id)",
    ];

    for index_sql in indexes {
        sqlx::query(index_sql).execute(pool).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(&pool)
                .await
                .unwrap();
        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        for expected in ["jobs", "internships", "articles", "roadmaps", "dsa_problems", "portfolios"] {
            assert!(names.contains(&expected), "missing table {}", expected);
        }
    }
}
