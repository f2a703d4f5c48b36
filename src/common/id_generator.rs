// src/common/id_generator.rs
//! Crockford Base32 ID Generator
//!
//! Generates human-readable, prefixed IDs using Crockford Base32 encoding.
//! Format: PREFIX_XXXXXX (e.g., J_K7NP3X for jobs)
//!
//! The alphabet excludes I, L, O and U so ids can be read aloud and typed
//! without confusion.

use rand::Rng;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityPrefix {
    /// Job posting (J_)
    Job,
    /// Internship posting (I_)
    Internship,
    /// Article (A_)
    Article,
    /// Roadmap (R_)
    Roadmap,
    /// Step inside a roadmap (S_)
    RoadmapStep,
    /// DSA problem (P_)
    Problem,
    /// DSA category (C_)
    Category,
    /// DSA topic (T_)
    Topic,
    /// DSA submission (SB_)
    Submission,
    /// DSA discussion post (D_)
    Discussion,
    /// Site user (U_)
    User,
    /// Admin account (AD_)
    Admin,
    /// Like/save/apply record (X_)
    Interaction,
    /// Footer page (PG_)
    Page,
    /// Portfolio template (PT_)
    PortfolioTemplate,
    /// Generated portfolio (PF_)
    Portfolio,
}

impl EntityPrefix {
    /// Get the string prefix for this entity type
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Job => "J",
            EntityPrefix::Internship => "I",
            EntityPrefix::Article => "A",
            EntityPrefix::Roadmap => "R",
            EntityPrefix::RoadmapStep => "S",
            EntityPrefix::Problem => "P",
            EntityPrefix::Category => "C",
            EntityPrefix::Topic => "T",
            EntityPrefix::Submission => "SB",
            EntityPrefix::Discussion => "D",
            EntityPrefix::User => "U",
            EntityPrefix::Admin => "AD",
            EntityPrefix::Interaction => "X",
            EntityPrefix::Page => "PG",
            EntityPrefix::PortfolioTemplate => "PT",
            EntityPrefix::Portfolio => "PF",
        }
    }
}

/// Generate a random Crockford Base32 string of specified length
fn generate_crockford_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..32);
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed ID using Crockford Base32 encoding
///
/// # Example
/// ```ignore
/// let job_id = generate_id(EntityPrefix::Job);
/// // Returns something like "J_K7NP3X"
/// ```
pub fn generate_id(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(6))
}

// ============================================================================
// Convenience functions for the most used entity types
// ============================================================================

pub fn generate_job_id() -> String {
    generate_id(EntityPrefix::Job)
}

pub fn generate_internship_id() -> String {
    generate_id(EntityPrefix::Internship)
}

pub fn generate_article_id() -> String {
    generate_id(EntityPrefix::Article)
}

pub fn generate_roadmap_id() -> String {
    generate_id(EntityPrefix::Roadmap)
}

pub fn generate_problem_id() -> String {
    generate_id(EntityPrefix::Problem)
}

pub fn generate_user_id() -> String {
    generate_id(EntityPrefix::User)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_format() {
        let job_id = generate_job_id();
        assert!(job_id.starts_with("J_"));
        assert_eq!(job_id.len(), 8);

        let submission_id = generate_id(EntityPrefix::Submission);
        assert!(submission_id.starts_with("SB_"));
        assert_eq!(submission_id.len(), 9);
    }

    #[test]
    fn test_crockford_alphabet_only() {
        let id = generate_internship_id();
        let random_part = &id[2..];

        for c in random_part.chars() {
            assert!(
                CROCKFORD_ALPHABET.contains(&(c as u8)),
                "Character '{}' not in Crockford alphabet",
                c
            );
        }
        for ambiguous in ['I', 'L', 'O', 'U'] {
            assert!(!random_part.contains(ambiguous));
        }
    }

    #[test]
    fn test_uniqueness() {
        let mut ids = HashSet::new();
        for _ in 0..1000 {
            assert!(ids.insert(generate_article_id()), "Duplicate ID generated");
        }
    }

    #[test]
    fn test_prefixes_are_distinct() {
        let all = [
            EntityPrefix::Job,
            EntityPrefix::Internship,
            EntityPrefix::Article,
            EntityPrefix::Roadmap,
            EntityPrefix::RoadmapStep,
            EntityPrefix::Problem,
            EntityPrefix::Category,
            EntityPrefix::Topic,
            EntityPrefix::Submission,
            EntityPrefix::Discussion,
            EntityPrefix::User,
            EntityPrefix::Admin,
            EntityPrefix::Interaction,
            EntityPrefix::Page,
            EntityPrefix::PortfolioTemplate,
            EntityPrefix::Portfolio,
        ];
        let prefixes: HashSet<&str> = all.iter().map(|p| p.as_str()).collect();
        assert_eq!(prefixes.len(), all.len());
        assert!(generate_roadmap_id().starts_with("R_"));
        assert!(generate_problem_id().starts_with("P_"));
        assert!(generate_user_id().starts_with("U_"));
    }
}
