// src/ai/tests.rs

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use chrono::{DateTime, Duration, Utc};
    use serde_json::json;

    use crate::common::test_support::{seed_admin, seed_user, send, test_app, test_state};

    #[tokio::test]
    async fn test_generation_requires_admin() {
        let state = test_state().await;
        let (_, user) = seed_user(&state, "jane@talentd.test").await;
        let app = test_app(&state);

        let (status, _) = send(&app, Method::POST, "/api/ai/generate-job?prompt=rust", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send(&app, Method::POST, "/api/ai/generate-job?prompt=rust", Some(&user), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unconfigured_llm_is_service_unavailable() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/ai/generate-article?prompt=resume%20tips",
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_dispatch_validates_type_and_count() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/ai/generate",
            Some(&admin),
            Some(json!({ "content_type": "video", "prompt": "anything" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unsupported content type: video");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/ai/generate-all?content_type=job&prompt=rust&count=11",
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_agent_falls_back_with_expiration() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/ai-agent/generate/internship",
            Some(&admin),
            Some(json!({ "prompt": "frontend intern" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["content"]["title"], "Software Development Intern");

        let expires: DateTime<Utc> = body["content"]["expiration_date"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        let days = (expires - Utc::now()).num_days();
        assert!((59..=60).contains(&days));
        assert!(expires > Utc::now() + Duration::days(59));

        let (status, body) = send(&app, Method::POST, "/api/ai-agent/generate/dsa-problem", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"]["slug"], "two-sum");
    }

    #[tokio::test]
    async fn test_public_resume_analysis_requires_text() {
        let state = test_state().await;
        let app = test_app(&state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/public-ai/analyze-resume",
            None,
            Some(json!({ "resume_text": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Resume text is required");
    }
}
