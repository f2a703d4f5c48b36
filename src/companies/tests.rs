// src/companies/tests.rs

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use axum::Router;
    use serde_json::json;

    use crate::common::test_support::{seed_admin, send, test_app, test_state};
    use crate::companies::models::ListingRow;
    use crate::companies::services::{aggregate, industry_counts};

    fn row(kind: &str, company: &str, location: &str, tags: &str, created_at: &str) -> ListingRow {
        ListingRow {
            kind: kind.to_string(),
            company: company.to_string(),
            company_logo: None,
            location: location.to_string(),
            tags: Some(tags.to_string()),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_aggregate_merges_names_case_insensitively() {
        let rows = vec![
            row("job", "acme", "Pune", r#"["fintech"]"#, "2026-01-01T00:00:00Z"),
            row("job", "Acme", "Remote", r#"["fintech","saas"]"#, "2026-03-01T00:00:00Z"),
            row("internship", "ACME", "Pune", "[]", "2026-02-01T00:00:00Z"),
            row("job", "Globex", "Delhi", r#"["retail"]"#, "2026-04-01T00:00:00Z"),
        ];

        let companies = aggregate(rows);
        assert_eq!(companies.len(), 2);

        let acme = &companies[0];
        assert_eq!(acme.name, "Acme");
        assert_eq!(acme.job_count, 2);
        assert_eq!(acme.internship_count, 1);
        assert_eq!(acme.locations, vec!["Pune", "Remote"]);
        assert_eq!(acme.industries, vec!["fintech", "saas"]);
        assert_eq!(acme.latest_posting, "2026-03-01T00:00:00Z");
        assert_eq!(companies[1].name, "Globex");
    }

    #[test]
    fn test_industry_counts_rank_by_listing() {
        let rows = vec![
            row("job", "Acme", "Pune", r#"["fintech","fintech"]"#, "2026-01-01T00:00:00Z"),
            row("job", "Globex", "Pune", r#"["fintech","retail"]"#, "2026-01-02T00:00:00Z"),
        ];
        let counts = industry_counts(&rows);
        assert_eq!(counts[0].industry, "fintech");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].industry, "retail");
    }

    async fn seed_listings(app: &Router, admin: &str) {
        for (title, company, status) in [
            ("Backend Engineer", "Acme", "published"),
            ("Frontend Engineer", "acme", "published"),
            ("Hidden Role", "Acme", "draft"),
            ("Store Manager", "Globex", "published"),
        ] {
            send(
                app,
                Method::POST,
                "/api/admin/jobs",
                Some(admin),
                Some(json!({
                    "title": title,
                    "company": company,
                    "description": "Join us",
                    "location": "Bengaluru",
                    "job_type": "full-time",
                    "experience_level": "experienced",
                    "tags": ["fintech"],
                    "status": status
                })),
            )
            .await;
        }
        send(
            app,
            Method::POST,
            "/api/admin/internships",
            Some(admin),
            Some(json!({
                "title": "ML Intern",
                "company": "Acme",
                "description": "Train models",
                "location": "Hyderabad",
                "duration": "3 months",
                "status": "published"
            })),
        )
        .await;
    }

    #[tokio::test]
    async fn test_company_search_and_profile() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);
        seed_listings(&app, &admin).await;

        let (status, found) = send(&app, Method::GET, "/api/companies/search?q=ac", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["total"], 1);
        assert_eq!(found["companies"][0]["job_count"], 2);
        assert_eq!(found["companies"][0]["internship_count"], 1);

        let (_, by_location) = send(&app, Method::GET, "/api/companies/search?location=hyderabad", None, None).await;
        assert_eq!(by_location["total"], 1);

        let (status, profile) = send(&app, Method::GET, "/api/companies/ACME", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["recent_jobs"].as_array().unwrap().len(), 2);
        assert_eq!(profile["recent_internships"].as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::GET, "/api/companies/Initech", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_company_listings_paginate_and_industries() {
        let state = test_state().await;
        let admin = seed_admin(&state, "editor", false).await;
        let app = test_app(&state);
        seed_listings(&app, &admin).await;

        let (status, page) = send(&app, Method::GET, "/api/companies/acme/jobs?limit=1&skip=1", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 2);
        assert_eq!(page["page"], 2);
        assert_eq!(page["total_pages"], 2);
        assert_eq!(page["jobs"].as_array().unwrap().len(), 1);

        let (_, internships) = send(&app, Method::GET, "/api/companies/acme/internships", None, None).await;
        assert_eq!(internships["total"], 1);

        let (_, stats) = send(&app, Method::GET, "/api/companies/stats/industries", None, None).await;
        assert_eq!(stats["industries"][0], json!({ "industry": "fintech", "count": 3 }));
    }
}
