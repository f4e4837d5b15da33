//! Feature Registry and Prompt Composer.
//!
//! A feature is a named prompt template with a single `{resume_text}`
//! placeholder. The set is fixed at process start; adding a new feature means
//! adding a template in `prompts.rs` and one entry in `builtin()`.

use std::collections::HashMap;

use anyhow::{ensure, Result};

pub mod prompts;

/// The one substitution point every feature template must contain.
pub const RESUME_TEXT_PLACEHOLDER: &str = "{resume_text}";

/// Immutable feature-id -> prompt-template map. Built once at startup,
/// shared read-only across requests.
pub struct FeatureRegistry {
    features: HashMap<&'static str, &'static str>,
}

impl FeatureRegistry {
    /// The built-in features, with each template validated to contain the
    /// resume-text placeholder exactly once. Validation failure aborts
    /// startup; templates never change after this point.
    pub fn builtin() -> Result<Self> {
        let features = HashMap::from([
            ("extract_skills", prompts::EXTRACT_SKILLS),
            ("identify_verbs", prompts::IDENTIFY_VERBS),
            ("suggest_improvements", prompts::SUGGEST_IMPROVEMENTS),
        ]);

        for (id, template) in &features {
            let occurrences = template.matches(RESUME_TEXT_PLACEHOLDER).count();
            ensure!(
                occurrences == 1,
                "feature '{id}' must contain {RESUME_TEXT_PLACEHOLDER} exactly once (found {occurrences})"
            );
        }

        Ok(Self { features })
    }

    pub fn lookup(&self, feature_id: &str) -> Option<&'static str> {
        self.features.get(feature_id).copied()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Fills a feature template with the resume text.
///
/// Exactly one substitution; `builtin()` guarantees the placeholder is
/// present, so the output never carries an unresolved placeholder.
pub fn compose(template: &str, resume_text: &str) -> String {
    template.replacen(RESUME_TEXT_PLACEHOLDER, resume_text, 1)
}
