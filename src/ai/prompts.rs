// src/ai/prompts.rs

use serde_json::Value;

use super::models::GeneratedKind;

fn brief(kind: GeneratedKind) -> &'static str {
    match kind {
        GeneratedKind::Job => {
            "Write a job posting for the Indian market. Description of 200-400 words, \
             5-10 requirements, 5-8 responsibilities, salary range in INR per year, \
             job_type one of full-time, part-time, contract, internship and \
             experience_level one of fresher, experienced, senior."
        }
        GeneratedKind::Internship => {
            "Write an internship posting for students in India. Description of 150-300 words, \
             3-8 requirements, 4-7 responsibilities, monthly stipend in INR and the \
             duration as a whole number of months."
        }
        GeneratedKind::Article => {
            "Write a career article for tech freshers. Content in markdown of 800-1500 words, \
             an excerpt of 100-150 words, a URL-friendly slug and 5-8 tags."
        }
        GeneratedKind::Roadmap => {
            "Write a step-by-step learning roadmap. difficulty_level is beginner, intermediate \
             or advanced. steps is an array of objects with keys title, description, \
             resources, estimated_duration, prerequisites and order."
        }
        GeneratedKind::DsaProblem => {
            "Write a coding interview problem. difficulty is easy, medium or hard. examples \
             are objects with input, output and explanation; test_cases are objects with \
             input and expected_output."
        }
    }
}

/// Builds the user prompt for one draft
pub fn generation_prompt(kind: GeneratedKind, prompt: &str, context: Option<&Value>) -> String {
    let mut text = format!("{}\n\nRequest: {}\n", brief(kind), prompt.trim());

    if let Some(context) = context.filter(|c| !c.is_null()) {
        text.push_str(&format!("\nAdditional context: {}\n", context));
    }

    text.push_str(&format!(
        "\nReturn only a JSON object with keys: {}",
        kind.keys().join(", ")
    ));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_lists_keys_and_context() {
        let text = generation_prompt(
            GeneratedKind::Internship,
            "  data science intern  ",
            Some(&json!({ "city": "Pune" })),
        );
        assert!(text.contains("Request: data science intern\n"));
        assert!(text.contains("Additional context: {\"city\":\"Pune\"}"));
        assert!(text.ends_with("stipend, duration_months, skills_required, benefits, tags"));

        let plain = generation_prompt(GeneratedKind::Job, "rust developer", None);
        assert!(!plain.contains("Additional context"));
    }
}
