// src/internships/tests/handlers_tests.rs

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::common::test_support::{seed_admin, send, test_app, test_state};

    #[tokio::test]
    async fn test_admin_internship_crud() {
        let state = test_state().await;
        let token = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/admin/internships",
            Some(&token),
            Some(json!({
                "title": "ML Intern",
                "company": "Acme",
                "description": "Train models",
                "location": "Hyderabad",
                "duration": "6 months",
                "stipend": 20000,
                "status": "published"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["duration_months"], 6);
        let id = created["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("I_"));

        let uri = format!("/api/admin/internships/{}", id);
        let (status, updated) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "duration_months": 2 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["duration_months"], 2);
        assert_eq!(updated["stipend"], 20000);

        let (status, list) = send(&app, Method::GET, "/api/public/internships?duration=2&location=HYD", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::GET, &format!("/api/public/internships/{}", id), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_internship_is_404() {
        let state = test_state().await;
        let token = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let (status, body) = send(&app, Method::GET, "/api/admin/internships/I_NOPE00", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Internship not found");
    }
}
