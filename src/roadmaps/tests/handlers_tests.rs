// src/roadmaps/tests/handlers_tests.rs

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::common::test_support::{seed_admin, send, test_app, test_state};

    #[tokio::test]
    async fn test_roadmap_steps_roundtrip_through_api() {
        let state = test_state().await;
        let token = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let (status, roadmap) = send(
            &app,
            Method::POST,
            "/api/admin/roadmaps",
            Some(&token),
            Some(json!({
                "title": "Backend Developer",
                "description": "From zero to production services",
                "difficulty_level": "intermediate",
                "status": "published",
                "steps": [
                    { "title": "Databases", "description": "SQL basics", "order": 2 },
                    { "title": "HTTP", "description": "Requests and responses", "order": 1, "resources": ["MDN"] }
                ]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(roadmap["slug"], "backend-developer");
        let steps = roadmap["steps"].as_array().unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0]["title"], "HTTP");
        assert_eq!(steps[0]["resources"], json!(["MDN"]));
        assert!(steps[1]["id"].as_str().unwrap().starts_with("S_"));

        let (status, detail) = send(&app, Method::GET, "/api/public/roadmaps/backend-developer", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["steps"].as_array().unwrap().len(), 2);

        let (_, list) = send(&app, Method::GET, "/api/public/roadmaps?difficulty=advanced", None, None).await;
        assert!(list.as_array().unwrap().is_empty());
        let (_, list) = send(&app, Method::GET, "/api/public/roadmaps?difficulty_level=intermediate", None, None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_roadmap_validation_and_duplicate_slug() {
        let state = test_state().await;
        let token = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let body = json!({
            "title": "DevOps",
            "slug": "devops",
            "description": "CI/CD",
            "difficulty_level": "beginner"
        });
        let (status, _) = send(&app, Method::POST, "/api/admin/roadmaps", Some(&token), Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, err) = send(&app, Method::POST, "/api/admin/roadmaps", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "Roadmap with this slug already exists");

        let (status, err) = send(
            &app,
            Method::POST,
            "/api/admin/roadmaps",
            Some(&token),
            Some(json!({ "title": "X", "description": "Y", "difficulty_level": "expert" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["code"], "VALIDATION_ERROR");
    }
}
