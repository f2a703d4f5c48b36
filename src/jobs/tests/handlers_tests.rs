// src/jobs/tests/handlers_tests.rs

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    use crate::common::test_support::{seed_admin, send, test_app, test_state};

    fn job_payload(title: &str) -> Value {
        json!({
            "title": title,
            "company": "Acme Labs",
            "description": "Work on backend services",
            "location": "Pune",
            "job_type": "full-time",
            "experience_level": "experienced",
            "skills": ["Rust", "PostgreSQL"],
            "application_deadline": "2030-01-31"
        })
    }

    #[tokio::test]
    async fn test_admin_job_crud() {
        let state = test_state().await;
        let token = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let (status, created) = send(&app, Method::POST, "/api/admin/jobs", Some(&token), Some(job_payload("Backend Engineer"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["status"], "draft");
        assert_eq!(created["salary_currency"], "INR");
        assert_eq!(created["created_by"], "editor");
        assert_eq!(created["skills_required"], json!(["Rust", "PostgreSQL"]));
        assert_eq!(created["application_deadline"], "2030-01-31T23:59:59Z");
        let id = created["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("J_"));

        let uri = format!("/api/admin/jobs/{}", id);
        let (status, updated) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "status": "published", "is_remote": true }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "published");
        assert_eq!(updated["is_remote"], true);
        assert_eq!(updated["title"], "Backend Engineer");

        let (status, list) = send(&app, Method::GET, "/api/admin/jobs?status=published", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Job deleted successfully");

        let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "title": "x" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_routes_require_admin_token() {
        let state = test_state().await;
        let app = test_app(&state);

        let (status, _) = send(&app, Method::GET, "/api/admin/jobs", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send(&app, Method::POST, "/api/admin/jobs", None, Some(job_payload("x"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_job_validation_error() {
        let state = test_state().await;
        let token = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let mut payload = job_payload("");
        payload["job_type"] = json!("gig");
        let (status, body) = send(&app, Method::POST, "/api/admin/jobs", Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_admin_list_search_and_window() {
        let state = test_state().await;
        let token = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        for title in ["Rust Developer", "Go Developer", "Data Analyst"] {
            send(&app, Method::POST, "/api/admin/jobs", Some(&token), Some(job_payload(title))).await;
        }

        let (_, list) = send(&app, Method::GET, "/api/admin/jobs?search=developer", Some(&token), None).await;
        assert_eq!(list.as_array().unwrap().len(), 2);

        let (_, list) = send(&app, Method::GET, "/api/admin/jobs?limit=1&skip=1", Some(&token), None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::GET, "/api/admin/jobs?status=deleted", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_wildcards_match_literally() {
        let state = test_state().await;
        let token = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        for title in ["100% Remote Role", "1000 Offices Role", "Back_end Engineer", "Backend Engineer"] {
            send(&app, Method::POST, "/api/admin/jobs", Some(&token), Some(job_payload(title))).await;
        }

        let (_, list) = send(&app, Method::GET, "/api/admin/jobs?search=100%25", Some(&token), None).await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["title"], "100% Remote Role");

        let (_, list) = send(&app, Method::GET, "/api/admin/jobs?search=back_end", Some(&token), None).await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["title"], "Back_end Engineer");
    }

    #[tokio::test]
    async fn test_fresher_jobs_force_experience_level() {
        let state = test_state().await;
        let token = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        send(&app, Method::POST, "/api/admin/jobs", Some(&token), Some(job_payload("Senior Role"))).await;
        let (status, created) = send(&app, Method::POST, "/api/admin/fresher-jobs", Some(&token), Some(job_payload("Graduate Trainee"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["experience_level"], "fresher");

        let (_, list) = send(&app, Method::GET, "/api/admin/fresher-jobs", Some(&token), None).await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["title"], "Graduate Trainee");
    }

    #[tokio::test]
    async fn test_public_jobs_only_published_and_count_views() {
        let state = test_state().await;
        let token = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let mut published = job_payload("Published Role");
        published["status"] = json!("published");
        published["is_remote"] = json!(true);
        let (_, job) = send(&app, Method::POST, "/api/admin/jobs", Some(&token), Some(published)).await;
        send(&app, Method::POST, "/api/admin/jobs", Some(&token), Some(job_payload("Draft Role"))).await;
        let id = job["id"].as_str().unwrap();

        let (status, list) = send(&app, Method::GET, "/api/public/jobs?location=pune&skills=rust,java&is_remote=true", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["title"], "Published Role");

        let (_, list) = send(&app, Method::GET, "/api/public/jobs?skills=java", None, None).await;
        assert!(list.as_array().unwrap().is_empty());

        let (status, detail) = send(&app, Method::GET, &format!("/api/public/jobs/{}", id), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["views"], 1);

        let views: i64 = sqlx::query_scalar("SELECT views FROM jobs WHERE id = ?")
            .bind(id)
            .fetch_one(&state.db)
            .await
            .unwrap();
        assert_eq!(views, 2);
    }

    #[tokio::test]
    async fn test_public_job_detail_hides_drafts() {
        let state = test_state().await;
        let token = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let (_, job) = send(&app, Method::POST, "/api/admin/jobs", Some(&token), Some(job_payload("Draft Role"))).await;
        let uri = format!("/api/public/jobs/{}", job["id"].as_str().unwrap());
        let (status, _) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
