// src/dsa/tests/handlers_tests.rs

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};

    use crate::common::test_support::{seed_admin, seed_user, send, test_app, test_state};

    async fn create_problem(app: &Router, admin: &str, body: Value) -> Value {
        let (status, problem) =
            send(app, Method::POST, "/api/admin/dsa-problems", Some(admin), Some(body)).await;
        assert_eq!(status, StatusCode::OK, "{}", problem);
        problem
    }

    fn two_sum() -> Value {
        json!({
            "title": "Two Sum",
            "description": "Return indices of two numbers adding up to target",
            "difficulty": "easy",
            "tags": ["array", "hash-map"],
            "hints": ["Use a hash map"],
            "test_cases": [
                { "input": "[2,7,11,15], 9", "expected_output": "[0,1]" },
                { "input": "[3,3], 6", "expected_output": "[0,1]", "is_hidden": true }
            ],
            "solution_approach": "Single pass with a map of seen values",
            "time_complexity": "O(n)",
            "space_complexity": "O(n)",
            "status": "published"
        })
    }

    #[tokio::test]
    async fn test_taxonomy_and_filtered_listing() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let (status, category) = send(
            &app,
            Method::POST,
            "/api/admin/dsa-categories",
            Some(&admin),
            Some(json!({ "name": "Arrays", "description": "Array problems" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let category_id = category["id"].as_str().unwrap().to_string();
        assert!(category_id.starts_with("C_"));

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/admin/dsa-topics",
            Some(&admin),
            Some(json!({ "category_id": "C_MISSING", "name": "Two pointers" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, topic) = send(
            &app,
            Method::POST,
            "/api/admin/dsa-topics",
            Some(&admin),
            Some(json!({ "category_id": category_id, "name": "Two pointers" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, topics) = send(
            &app,
            Method::GET,
            &format!("/api/dsa/categories/{}/topics", category_id),
            None,
            None,
        )
        .await;
        assert_eq!(topics["topics"][0]["id"], topic["id"]);

        let mut body = two_sum();
        body["category_id"] = json!(category_id);
        create_problem(&app, &admin, body).await;
        create_problem(
            &app,
            &admin,
            json!({
                "title": "Median of Two Sorted Arrays",
                "description": "Find the median",
                "difficulty": "hard",
                "status": "published"
            }),
        )
        .await;
        create_problem(
            &app,
            &admin,
            json!({ "title": "Draft", "description": "Hidden", "difficulty": "easy" }),
        )
        .await;

        let (status, page) = send(&app, Method::GET, "/api/dsa/problems", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 2);
        assert_eq!(page["page"], 1);
        assert_eq!(page["total_pages"], 1);

        let (_, page) = send(&app, Method::GET, "/api/dsa/problems?difficulty=easy", None, None).await;
        assert_eq!(page["total"], 1);
        let listed = &page["problems"][0];
        assert_eq!(listed["slug"], "two-sum");
        assert!(listed.get("solution_approach").is_none());
        assert_eq!(listed["test_cases"].as_array().unwrap().len(), 1);

        let (_, page) = send(&app, Method::GET, "/api/dsa/problems?search=hash", None, None).await;
        assert_eq!(page["total"], 1);

        let (_, page) = send(&app, Method::GET, "/api/dsa/problems?limit=1&skip=1", None, None).await;
        assert_eq!(page["page"], 2);
        assert_eq!(page["total_pages"], 2);
    }

    #[tokio::test]
    async fn test_submit_tracks_progress_and_unlocks_solution() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let (_, user) = seed_user(&state, "coder@talentd.test").await;
        let app = test_app(&state);

        let problem = create_problem(&app, &admin, two_sum()).await;
        let id = problem["id"].as_str().unwrap().to_string();

        let (status, err) = send(
            &app,
            Method::GET,
            &format!("/api/dsa/problems/{}/solution", id),
            Some(&user),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(err["error"], "Attempt the problem first to view solution");

        let (status, result) = send(
            &app,
            Method::POST,
            &format!("/api/dsa/problems/{}/submit", id),
            Some(&user),
            Some(json!({ "code": "print('wrong')", "outputs": ["[0,1]", "[1,0]"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["status"], "wrong_answer");
        assert_eq!(result["test_cases_passed"], 1);
        assert_eq!(result["total_test_cases"], 2);
        assert_eq!(result["message"], "Solution submitted successfully");

        let (_, solution) = send(
            &app,
            Method::GET,
            &format!("/api/dsa/problems/{}/solution", id),
            Some(&user),
            None,
        )
        .await;
        assert_eq!(solution["time_complexity"], "O(n)");
        assert!(solution["user_best_solution"].is_null());

        let (_, result) = send(
            &app,
            Method::POST,
            &format!("/api/dsa/problems/{}/submit", id),
            Some(&user),
            Some(json!({ "code": "def two_sum(): ...", "language": "python", "outputs": ["[0,1]", " [0,1]\n"] })),
        )
        .await;
        assert_eq!(result["status"], "accepted");

        let (status, detail) = send(
            &app,
            Method::GET,
            &format!("/api/dsa/problems/{}", id),
            Some(&user),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["user_progress"]["status"], "solved");
        assert_eq!(detail["user_progress"]["attempts"], 2);
        assert_eq!(detail["user_progress"]["best_solution"], "def two_sum(): ...");
        assert_eq!(detail["recent_submissions"].as_array().unwrap().len(), 2);
        assert_eq!(detail["problem"]["solved_count"], 1);
        assert_eq!(detail["problem"]["attempts"], 2);

        let (_, progress) = send(&app, Method::GET, "/api/dsa/progress", Some(&user), None).await;
        assert_eq!(progress["total_solved"], 1);
        assert_eq!(progress["total_problems"], 1);
        assert_eq!(progress["by_difficulty"]["easy"], json!({ "solved": 1, "total": 1 }));
        assert_eq!(progress["by_difficulty"]["hard"], json!({ "solved": 0, "total": 0 }));

        let (_, hints) = send(
            &app,
            Method::GET,
            &format!("/api/dsa/problems/{}/hints", id),
            Some(&user),
            None,
        )
        .await;
        assert_eq!(hints["hints"], json!(["Use a hash map"]));
    }

    #[tokio::test]
    async fn test_listing_shows_status_only_to_signed_in_user() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let (_, user) = seed_user(&state, "coder@talentd.test").await;
        let app = test_app(&state);
        let problem = create_problem(&app, &admin, two_sum()).await;
        let id = problem["id"].as_str().unwrap();

        send(
            &app,
            Method::POST,
            &format!("/api/dsa/problems/{}/submit", id),
            Some(&user),
            Some(json!({ "code": "pass", "outputs": ["[0,1]", "[0,1]"] })),
        )
        .await;

        let (status, mine) = send(&app, Method::GET, "/api/dsa/problems", Some(&user), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine["problems"][0]["user_status"], "solved");

        let (_, anonymous) = send(&app, Method::GET, "/api/dsa/problems", None, None).await;
        assert!(anonymous["problems"][0].get("user_status").is_none());

        let (status, bad_token) =
            send(&app, Method::GET, "/api/dsa/problems", Some("not-a-token"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(bad_token["problems"][0].get("user_status").is_none());
    }

    #[tokio::test]
    async fn test_problem_endpoints_require_user() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);
        let problem = create_problem(&app, &admin, two_sum()).await;

        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/dsa/problems/{}", problem["id"].as_str().unwrap()),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::GET, "/api/dsa/progress", Some(&admin), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_discussion_threads_with_replies() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let (_, user) = seed_user(&state, "priya.k@talentd.test").await;
        let app = test_app(&state);
        let problem = create_problem(&app, &admin, two_sum()).await;
        let uri = format!("/api/dsa/problems/{}/discussions", problem["id"].as_str().unwrap());

        let (status, created) = send(
            &app,
            Method::POST,
            &uri,
            Some(&user),
            Some(json!({ "content": "Is sorting allowed?" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["message"], "Discussion created successfully");
        let thread_id = created["discussion_id"].as_str().unwrap().to_string();

        for reply in ["Yes", "But it costs O(n log n)"] {
            send(
                &app,
                Method::POST,
                &uri,
                Some(&user),
                Some(json!({ "content": reply, "parent_id": thread_id })),
            )
            .await;
        }

        let (status, _) = send(
            &app,
            Method::POST,
            &uri,
            Some(&user),
            Some(json!({ "content": "Orphan", "parent_id": "D_NOPE00" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, listing) = send(&app, Method::GET, &uri, None, None).await;
        let threads = listing["discussions"].as_array().unwrap();
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0]["user_name"], "priya.k");
        assert_eq!(threads[0]["is_solution"], false);
        let replies = threads[0]["replies"].as_array().unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["content"], "Yes");
    }

    #[tokio::test]
    async fn test_admin_problem_update_and_duplicate_slug() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);

        let problem = create_problem(&app, &admin, two_sum()).await;
        let (status, err) =
            send(&app, Method::POST, "/api/admin/dsa-problems", Some(&admin), Some(two_sum())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "DSA problem with this slug already exists");

        let uri = format!("/api/admin/dsa-problems/{}", problem["id"].as_str().unwrap());
        let (status, updated) = send(
            &app,
            Method::PUT,
            &uri,
            Some(&admin),
            Some(json!({ "difficulty": "medium", "hints": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["difficulty"], "medium");
        assert_eq!(updated["title"], "Two Sum");
        assert!(updated["hints"].as_array().unwrap().is_empty());
        assert_eq!(updated["solution_approach"], "Single pass with a map of seen values");

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::GET, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
