// src/admin/tests.rs

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::common::test_support::{seed_admin, seed_user, send, test_app, test_state};

    fn job(title: &str) -> serde_json::Value {
        json!({
            "title": title,
            "company": "Acme",
            "description": "Build services",
            "location": "Pune",
            "job_type": "full-time",
            "experience_level": "experienced",
            "status": "published"
        })
    }

    #[tokio::test]
    async fn test_dashboard_stats_counts_and_activity() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        seed_user(&state, "reader@talentd.test").await;
        let app = test_app(&state);

        let (_, first) = send(&app, Method::POST, "/api/admin/jobs", Some(&admin), Some(job("Backend Engineer"))).await;
        send(&app, Method::POST, "/api/admin/jobs", Some(&admin), Some(job("Data Engineer"))).await;
        send(
            &app,
            Method::POST,
            "/api/admin/articles",
            Some(&admin),
            Some(json!({ "title": "Resume tips", "content": "Keep it short", "category": "careers" })),
        )
        .await;

        // Two public detail views on the first job
        let uri = format!("/api/public/jobs/{}", first["id"].as_str().unwrap());
        send(&app, Method::GET, &uri, None, None).await;
        send(&app, Method::GET, &uri, None, None).await;

        let (status, stats) = send(&app, Method::GET, "/api/admin/dashboard/stats", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["total_jobs"], 2);
        assert_eq!(stats["total_articles"], 1);
        assert_eq!(stats["total_internships"], 0);
        assert_eq!(stats["total_users"], 1);
        assert_eq!(stats["total_views"], 2);
        assert_eq!(stats["recent_activity"].as_array().unwrap().len(), 3);
        assert_eq!(stats["popular_content"][0]["title"], "Backend Engineer");
        assert_eq!(stats["popular_content"][0]["type"], "job");
        assert_eq!(stats["popular_content"][0]["views"], 2);
    }

    #[tokio::test]
    async fn test_dashboard_requires_admin() {
        let state = test_state().await;
        let (_, user) = seed_user(&state, "reader@talentd.test").await;
        let app = test_app(&state);

        let (status, _) = send(&app, Method::GET, "/api/admin/dashboard/stats", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send(&app, Method::GET, "/api/admin/dashboard/stats", Some(&user), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_manual_expiration_sweep() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let mut stale = job("Stale listing");
        stale["application_deadline"] = json!("2020-01-01");
        send(&app, Method::POST, "/api/admin/jobs", Some(&admin), Some(stale)).await;

        let mut gone = job("Gone listing");
        gone["expiration_date"] = json!("2020-01-01T00:00:00Z");
        send(&app, Method::POST, "/api/admin/jobs", Some(&admin), Some(gone)).await;

        send(&app, Method::POST, "/api/admin/jobs", Some(&admin), Some(job("Fresh listing"))).await;

        let (status, report) = send(&app, Method::POST, "/api/admin/expire-content", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["expired_jobs"], 1);
        assert_eq!(report["deleted_jobs"], 1);
        assert_eq!(report["deleted_articles"], 0);

        let (_, jobs) = send(&app, Method::GET, "/api/admin/jobs", Some(&admin), None).await;
        let jobs = jobs.as_array().unwrap();
        assert_eq!(jobs.len(), 2);
        let archived = jobs.iter().find(|j| j["title"] == "Stale listing").unwrap();
        assert_eq!(archived["status"], "archived");
        assert_eq!(archived["archived_reason"], "Expired - Application deadline passed");

        let (_, again) = send(&app, Method::POST, "/api/admin/expire-content", Some(&admin), None).await;
        assert_eq!(again["expired_jobs"], 0);
        assert_eq!(again["deleted_jobs"], 0);
    }

    #[tokio::test]
    async fn test_settings_update_requires_superuser_and_masks_secrets() {
        let state = test_state().await;
        let editor = seed_admin(&state, "editor", false).await;
        let root = seed_admin(&state, "root", true).await;
        let app = test_app(&state);

        let body = json!({
            "settings": {
                "llm_model": { "value": "gpt-4o" },
                "llm_api_key": { "value": "sk-test-1234567890", "description": "Provider key" }
            }
        });

        let (status, _) = send(&app, Method::PUT, "/api/admin/settings", Some(&editor), Some(body.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, updated) = send(&app, Method::PUT, "/api/admin/settings", Some(&root), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["updated"], json!(["llm_api_key", "llm_model"]));

        let (_, settings) = send(&app, Method::GET, "/api/admin/settings", Some(&editor), None).await;
        let settings = settings.as_array().unwrap();
        let key = settings.iter().find(|s| s["key"] == "llm_api_key").unwrap();
        assert_eq!(key["value"], "********7890");
        assert_eq!(key["updated_by"], "root");
        let model = settings.iter().find(|s| s["key"] == "llm_model").unwrap();
        assert_eq!(model["value"], "gpt-4o");

        let (_, result) = send(
            &app,
            Method::POST,
            "/api/admin/settings/test-connection",
            Some(&editor),
            Some(json!({ "service": "llm" })),
        )
        .await;
        assert_eq!(result["success"], true);

        let (status, _) = send(&app, Method::DELETE, "/api/admin/settings/llm_model", Some(&root), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, "/api/admin/settings/llm_model", Some(&root), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
