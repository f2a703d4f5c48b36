// src/ai/generator.rs

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::fallbacks::fallback_draft;
use super::models::GeneratedKind;
use super::prompts::generation_prompt;
use crate::common::helpers::days_from_now;
use crate::services::{GenerationPurpose, LlmError, LlmService};

/// Drafts admin content through the LLM
pub struct ContentGenerator<'a> {
    llm: &'a LlmService,
}

impl<'a> ContentGenerator<'a> {
    pub fn new(llm: &'a LlmService) -> Self {
        Self { llm }
    }

    pub async fn generate(
        &self,
        kind: GeneratedKind,
        prompt: &str,
        context: Option<&Value>,
    ) -> Result<Value, LlmError> {
        let text = generation_prompt(kind, prompt, context);
        let reply = self
            .llm
            .generate_json(GenerationPurpose::ContentGeneration, &text)
            .await?;

        info!(kind = kind.as_str(), "Draft generated");
        Ok(with_keys(kind, reply))
    }

    /// Never fails: LLM errors yield the built-in draft. Either way the draft
    /// gets an `expiration_date`.
    pub async fn generate_or_fallback(&self, kind: GeneratedKind, prompt: Option<&str>) -> Value {
        let prompt = prompt
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("a realistic {} for freshers in India", kind.label().to_lowercase()));

        let mut draft = match self.generate(kind, &prompt, None).await {
            Ok(draft) => draft,
            Err(e) => {
                warn!(kind = kind.as_str(), error = %e, "Generation failed, using fallback draft");
                fallback_draft(kind)
            }
        };

        if let Value::Object(fields) = &mut draft {
            fields.insert(
                "expiration_date".to_string(),
                Value::String(days_from_now(kind.expiration_days())),
            );
        }
        draft
    }
}

/// Fills keys the model left out with null; non-object replies become an empty draft
pub fn with_keys(kind: GeneratedKind, reply: Value) -> Value {
    let mut fields = match reply {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    for key in kind.keys() {
        fields.entry(key.to_string()).or_insert(Value::Null);
    }
    Value::Object(fields)
}
