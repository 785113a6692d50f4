//! External translation delegate abstraction.
//!
//! The request handler depends on the [`TranslationDelegate`] trait instead
//! of a concrete API client, which keeps the fallback branch explicit and
//! lets tests substitute a mock. A missing delegate is a first-class state:
//! the service then runs in fallback-only mode.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::AppConfig;

pub mod gemini;

/// Successful delegate output, already stripped and parsed.
#[derive(Debug, Clone)]
pub struct DelegateTranslation {
    /// Non-empty translated text.
    pub translated_text: String,
    /// Delegate-supplied confidence, clamped into `[0.0, 1.0]` when numeric.
    pub confidence_score: Option<f64>,
    /// Source language detected by the delegate, if it reported one.
    pub detected_lang: Option<String>,
}

/// Failure reasons for a delegate attempt.
///
/// These are recovered locally via the fallback transform and never surfaced
/// to the caller.
#[derive(Debug, thiserror::Error)]
pub enum DelegateError {
    #[error("delegate request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("delegate returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("delegate response contained no candidate text")]
    EmptyCandidate,
    #[error("delegate payload is not valid JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error("delegate payload has an empty translated_text")]
    EmptyTranslation,
}

/// Contract implemented by external translation providers.
#[async_trait]
pub trait TranslationDelegate: Send + Sync {
    /// Performs a single translation attempt; no retries.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<DelegateTranslation, DelegateError>;
}

/// Builds the configured delegate, if any.
///
/// Returns `None` both when no API key is configured and when client
/// construction fails; the latter is logged and never retried.
pub fn build_delegate(cfg: &AppConfig) -> Option<Arc<dyn TranslationDelegate>> {
    let api_key = cfg.gemini_api_key.clone()?;

    match gemini::GeminiDelegate::new(
        api_key,
        cfg.gemini_api_base.clone(),
        cfg.gemini_model.clone(),
        cfg.delegate_timeout_secs,
    ) {
        Ok(delegate) => {
            info!(model = %cfg.gemini_model, "gemini delegation enabled");
            Some(Arc::new(delegate))
        }
        Err(err) => {
            warn!(error = %err, "failed to initialize gemini delegate; running fallback-only");
            None
        }
    }
}
