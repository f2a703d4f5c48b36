// src/ai/fallbacks.rs
//! Built-in drafts returned by the agent endpoints when the LLM is unavailable.

use serde_json::{json, Value};

use super::models::GeneratedKind;

pub fn fallback_draft(kind: GeneratedKind) -> Value {
    match kind {
        GeneratedKind::Job => json!({
            "title": "Software Developer",
            "company": "Tech Solutions Ltd",
            "description": "We are looking for a software developer to build and maintain our web services.",
            "requirements": ["Bachelor's degree in Computer Science", "2+ years of experience"],
            "responsibilities": ["Develop software applications", "Write clean, tested code"],
            "location": "Bengaluru, India",
            "salary_min": 600000,
            "salary_max": 1200000,
            "salary_currency": "INR",
            "skills_required": ["Python", "JavaScript", "React"],
            "benefits": ["Health insurance", "Flexible hours"],
            "tags": ["tech", "software", "development"],
            "job_type": "full-time",
            "experience_level": "experienced"
        }),
        GeneratedKind::Internship => json!({
            "title": "Software Development Intern",
            "company": "StartupXYZ",
            "description": "Join our engineering team as an intern and ship real features with mentorship.",
            "requirements": ["Pursuing a Computer Science degree", "Basic programming knowledge"],
            "responsibilities": ["Assist in feature development", "Learn the team's stack"],
            "location": "Mumbai, India",
            "stipend": 20000,
            "duration_months": 3,
            "skills_required": ["Python", "JavaScript", "HTML/CSS"],
            "benefits": ["Mentorship", "Certificate", "Flexible timing"],
            "tags": ["internship", "software", "learning"]
        }),
        GeneratedKind::Article => json!({
            "title": "Getting Started in Tech",
            "slug": "getting-started-in-tech",
            "excerpt": "A practical guide for freshers planning their first steps into a tech career.",
            "content": "# Getting Started in Tech\n\nPick one language, build small projects and share them publicly.",
            "category": "Fresher Guide",
            "tags": ["career", "freshers", "guide"],
            "reading_time_minutes": 6,
            "seo_meta_title": "Getting Started in Tech: A Fresher's Guide",
            "seo_meta_description": "Practical first steps for freshers starting a career in technology."
        }),
        GeneratedKind::Roadmap => json!({
            "title": "Full Stack Developer Roadmap",
            "slug": "full-stack-developer-roadmap",
            "description": "A guided path from web fundamentals to deploying full stack applications.",
            "difficulty_level": "intermediate",
            "estimated_completion_time": "8 months",
            "prerequisites": ["Basic programming knowledge", "HTML/CSS basics"],
            "steps": [
                {
                    "title": "Frontend Fundamentals",
                    "description": "Learn HTML, CSS and JavaScript basics",
                    "resources": ["MDN Web Docs", "freeCodeCamp"],
                    "estimated_duration": "4 weeks",
                    "prerequisites": [],
                    "order": 1
                }
            ],
            "tags": ["programming", "web development", "full stack"]
        }),
        GeneratedKind::DsaProblem => json!({
            "title": "Two Sum",
            "slug": "two-sum",
            "description": "Given an array of integers and a target, return the indices of the two numbers that add up to the target.",
            "difficulty": "easy",
            "tags": ["arrays", "hashing"],
            "examples": [
                {
                    "input": "nums = [2,7,11,15], target = 9",
                    "output": "[0,1]",
                    "explanation": "nums[0] + nums[1] = 9"
                }
            ],
            "constraints": ["2 <= nums.length", "Exactly one solution exists"],
            "hints": ["Use a hash map for an O(n) solution", "Store indices as values"],
            "test_cases": [
                { "input": "[2,7,11,15], 9", "expected_output": "[0,1]" }
            ],
            "solution_approach": "Store each number's complement in a hash map while scanning once.",
            "time_complexity": "O(n)",
            "space_complexity": "O(n)"
        }),
    }
}
