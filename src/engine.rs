//! Translation request handling: validate, attempt delegation, fall back.
//!
//! The engine owns the whole contract for one request. The delegate attempt
//! is a single try; every delegate failure is recovered locally through the
//! deterministic token-suffixing transform and logged, never surfaced.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::delegate::TranslationDelegate;
use crate::error::AppError;
use crate::scoring::ConfidenceScorer;

/// Inbound translation request body.
#[derive(Debug, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate; must be non-empty after trimming.
    pub text: String,
    /// Source language identifier, or the sentinel `"auto"`.
    pub source_lang: String,
    /// Target language identifier; must differ from `source_lang`.
    pub target_lang: String,
}

/// Outbound translation response body.
#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    pub translated_text: String,
    /// Heuristic confidence in `[0.0, 1.0]`.
    pub confidence_score: f64,
    /// Source language reported by the delegate, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_lang: Option<String>,
}

/// Per-request translation pipeline shared by all handlers.
pub struct TranslationEngine {
    delegate: Option<Arc<dyn TranslationDelegate>>,
    scorer: ConfidenceScorer,
}

impl TranslationEngine {
    /// Builds an engine; `delegate: None` selects fallback-only mode.
    pub fn new(delegate: Option<Arc<dyn TranslationDelegate>>, scorer: ConfidenceScorer) -> Self {
        Self { delegate, scorer }
    }

    /// Whether an external delegate is configured.
    pub fn delegate_enabled(&self) -> bool {
        self.delegate.is_some()
    }

    /// Runs the full contract for one request.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, AppError> {
        if request.text.trim().is_empty() {
            return Err(AppError::invalid_request("text must not be empty"));
        }
        if request.source_lang == request.target_lang {
            return Err(AppError::invalid_request(
                "source and target languages must be different",
            ));
        }

        if let Some(delegate) = &self.delegate {
            match delegate
                .translate(&request.text, &request.source_lang, &request.target_lang)
                .await
            {
                Ok(outcome) => {
                    if let Some(lang) = &outcome.detected_lang {
                        info!(detected_lang = %lang, "delegate detected source language");
                    }
                    let confidence_score = outcome
                        .confidence_score
                        .unwrap_or_else(|| self.scorer.score(&request.text));
                    return Ok(TranslationResponse {
                        translated_text: outcome.translated_text,
                        confidence_score,
                        detected_lang: outcome.detected_lang,
                    });
                }
                Err(err) => {
                    warn!(error = %err, "delegate failed; using simulated translation");
                }
            }
        }

        let translated_text =
            simulate_translation(&request.text, &request.source_lang, &request.target_lang);
        let confidence_score = self.scorer.score(&request.text);

        Ok(TranslationResponse {
            translated_text,
            confidence_score,
            detected_lang: None,
        })
    }
}

/// Deterministic fallback transform: per-token target-language suffixes.
fn simulate_translation(text: &str, source_lang: &str, target_lang: &str) -> String {
    let suffix = match (source_lang, target_lang) {
        ("en", "es") => "es".to_string(),
        ("es", "en") => "en".to_string(),
        ("en", "ibo") => "ibo".to_string(),
        _ => target_lang.to_string(),
    };

    text.split_whitespace()
        .map(|token| format!("{token}_{suffix}"))
        .collect::<Vec<_>>()
        .join(" ")
}
