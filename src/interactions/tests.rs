// src/interactions/tests.rs

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use axum::Router;
    use serde_json::json;

    use crate::common::test_support::{seed_admin, seed_user, send, test_app, test_state};

    async fn create_job(app: &Router, admin: &str) -> String {
        let (_, job) = send(
            app,
            Method::POST,
            "/api/admin/jobs",
            Some(admin),
            Some(json!({
                "title": "QA Engineer",
                "company": "Acme",
                "description": "Test things",
                "location": "Chennai",
                "job_type": "full-time",
                "experience_level": "fresher",
                "status": "published"
            })),
        )
        .await;
        job["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_like_toggles_and_mirrors_article_likes() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let (_, alice) = seed_user(&state, "alice@talentd.test").await;
        let (_, bob) = seed_user(&state, "bob@talentd.test").await;
        let app = test_app(&state);

        let (_, article) = send(
            &app,
            Method::POST,
            "/api/admin/articles",
            Some(&admin),
            Some(json!({ "title": "Salary negotiation", "content": "Ask", "category": "careers" })),
        )
        .await;
        let id = article["id"].as_str().unwrap();
        let uri = format!("/api/interactions/article/{}/like", id);

        let (status, liked) = send(&app, Method::POST, &uri, Some(&alice), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(liked, json!({ "liked": true, "total_likes": 1 }));
        let (_, liked) = send(&app, Method::POST, &uri, Some(&bob), None).await;
        assert_eq!(liked["total_likes"], 2);

        let (_, stored) = send(&app, Method::GET, &format!("/api/admin/articles/{}", id), Some(&admin), None).await;
        assert_eq!(stored["likes"], 2);

        let (_, unliked) = send(&app, Method::POST, &uri, Some(&alice), None).await;
        assert_eq!(unliked, json!({ "liked": false, "total_likes": 1 }));
    }

    #[tokio::test]
    async fn test_apply_is_deduplicated_and_counts() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let (_, user) = seed_user(&state, "alice@talentd.test").await;
        let app = test_app(&state);
        let job_id = create_job(&app, &admin).await;
        let uri = format!("/api/interactions/job/{}/apply", job_id);

        let (status, first) = send(&app, Method::POST, &uri, Some(&user), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["message"], "Application recorded successfully");

        let (status, second) = send(&app, Method::POST, &uri, Some(&user), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["message"], "You have already applied to this position");

        let (_, job) = send(&app, Method::GET, &format!("/api/admin/jobs/{}", job_id), Some(&admin), None).await;
        assert_eq!(job["applications"], 1);

        let (status, err) = send(&app, Method::POST, "/api/interactions/article/A_X/apply", Some(&user), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "Apply action only available for jobs and internships");

        let (status, _) = send(&app, Method::POST, "/api/interactions/job/J_MISSING/apply", Some(&user), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_save_share_status_and_saved_list() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let (_, user) = seed_user(&state, "alice@talentd.test").await;
        let app = test_app(&state);
        let job_id = create_job(&app, &admin).await;

        let (_, saved) = send(&app, Method::POST, &format!("/api/interactions/job/{}/save", job_id), Some(&user), None).await;
        assert_eq!(saved["saved"], true);

        let (_, shared) = send(
            &app,
            Method::POST,
            "/api/interactions/dsa_problem/P_ABC123/share?platform=twitter",
            Some(&user),
            None,
        )
        .await;
        assert_eq!(shared["share_url"], "https://talentd.test/dsa-corner/problem/P_ABC123");

        let (_, status) = send(&app, Method::GET, &format!("/api/interactions/job/{}/status", job_id), Some(&user), None).await;
        assert_eq!(
            status,
            json!({ "liked": false, "saved": true, "applied": false, "shared": false, "total_likes": 0 })
        );

        let (_, list) = send(&app, Method::GET, "/api/interactions/saved?content_type=job", Some(&user), None).await;
        let items = list["saved_items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "QA Engineer");

        let (_, unsaved) = send(&app, Method::POST, &format!("/api/interactions/job/{}/save", job_id), Some(&user), None).await;
        assert_eq!(unsaved["saved"], false);
        let (_, list) = send(&app, Method::GET, "/api/interactions/saved", Some(&user), None).await;
        assert!(list["saved_items"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_interactions_require_user_and_known_type() {
        let state = test_state().await;
        let (_, user) = seed_user(&state, "alice@talentd.test").await;
        let app = test_app(&state);

        let (status, _) = send(&app, Method::GET, "/api/interactions/saved", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::POST, "/api/interactions/video/V_1/like", Some(&user), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
