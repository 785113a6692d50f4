//! Gemini `generateContent` delegate implementation.
//!
//! The prompt instructs the model to answer with a bare JSON object; in
//! practice responses sometimes arrive wrapped in Markdown code fences, so
//! the candidate text is stripped before parsing.

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::delegate::{DelegateError, DelegateTranslation, TranslationDelegate};

/// Delegate backed by the generative-language `generateContent` endpoint.
pub struct GeminiDelegate {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiDelegate {
    /// Creates a delegate with a bounded per-request timeout.
    pub fn new(
        api_key: String,
        api_base: String,
        model: String,
        timeout_secs: u64,
    ) -> Result<Self, DelegateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            api_base,
            model,
        })
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// JSON object the prompt asks the model to emit.
#[derive(Debug, Deserialize)]
struct DelegatePayload {
    #[serde(default)]
    translated_text: String,
    confidence_score: Option<Value>,
    detected_lang: Option<String>,
}

#[async_trait]
impl TranslationDelegate for GeminiDelegate {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<DelegateTranslation, DelegateError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        );
        let prompt = build_prompt(source_lang, target_lang);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: Cow::Owned(prompt),
                    },
                    Part {
                        text: Cow::Borrowed(text),
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DelegateError::Status(response.status()));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let raw = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .find_map(|part| part.text)
            })
            .ok_or(DelegateError::EmptyCandidate)?;

        parse_delegate_payload(&raw)
    }
}

/// Builds the translation prompt sent ahead of the user text.
fn build_prompt(source_lang: &str, target_lang: &str) -> String {
    format!(
        "You are a translation engine. If source language is 'auto', detect it. \
         Translate the given text strictly from {source_lang} to {target_lang}.\n\
         Return ONLY a JSON object with the following shape: \
         {{\"translated_text\": string, \"confidence_score\": number between 0 and 1, \
         \"detected_lang\": string}}. Do not include any additional commentary."
    )
}

/// Parses the model's JSON answer into a [`DelegateTranslation`].
///
/// `confidence_score` is kept only when numeric and is clamped into
/// `[0.0, 1.0]`; any other type leaves it unset.
fn parse_delegate_payload(raw: &str) -> Result<DelegateTranslation, DelegateError> {
    let cleaned = strip_code_fences(raw);
    let payload: DelegatePayload = serde_json::from_str(cleaned)?;

    let translated_text = payload.translated_text.trim().to_string();
    if translated_text.is_empty() {
        return Err(DelegateError::EmptyTranslation);
    }

    let confidence_score = payload
        .confidence_score
        .as_ref()
        .and_then(Value::as_f64)
        .map(|score| score.clamp(0.0, 1.0));

    Ok(DelegateTranslation {
        translated_text,
        confidence_score,
        detected_lang: payload.detected_lang.filter(|lang| !lang.is_empty()),
    })
}

/// Removes an optional Markdown code fence, including a leading `json` tag.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let inner = trimmed.trim_matches(|c| c == '`' || c == '\n' || c == ' ');
    match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => inner[4..].trim_start(),
        _ => inner,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_delegate_payload, strip_code_fences};
    use crate::delegate::DelegateError;

    #[test]
    fn strips_plain_code_fences() {
        let raw = "```\n{\"translated_text\": \"Hola\"}\n```";
        assert_eq!(strip_code_fences(raw), "{\"translated_text\": \"Hola\"}");
    }

    #[test]
    fn strips_json_tagged_code_fences() {
        let raw = "```json\n{\"translated_text\": \"Hola\"}\n```";
        assert_eq!(strip_code_fences(raw), "{\"translated_text\": \"Hola\"}");
    }

    #[test]
    fn leaves_unfenced_text_untouched() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn parses_full_payload() {
        let raw = r#"{"translated_text": "Hola mundo", "confidence_score": 0.92, "detected_lang": "en"}"#;
        let parsed = parse_delegate_payload(raw).unwrap();
        assert_eq!(parsed.translated_text, "Hola mundo");
        assert_eq!(parsed.confidence_score, Some(0.92));
        assert_eq!(parsed.detected_lang.as_deref(), Some("en"));
    }

    #[test]
    fn clamps_out_of_range_confidence() {
        let raw = r#"{"translated_text": "Hola", "confidence_score": 1.7}"#;
        let parsed = parse_delegate_payload(raw).unwrap();
        assert_eq!(parsed.confidence_score, Some(1.0));
    }

    #[test]
    fn ignores_non_numeric_confidence() {
        let raw = r#"{"translated_text": "Hola", "confidence_score": "high"}"#;
        let parsed = parse_delegate_payload(raw).unwrap();
        assert_eq!(parsed.confidence_score, None);
    }

    #[test]
    fn rejects_empty_translation() {
        let raw = r#"{"translated_text": "   ", "confidence_score": 0.5}"#;
        assert!(matches!(
            parse_delegate_payload(raw),
            Err(DelegateError::EmptyTranslation)
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_delegate_payload("not json at all"),
            Err(DelegateError::MalformedPayload(_))
        ));
    }

    #[test]
    fn empty_detected_lang_is_dropped() {
        let raw = r#"{"translated_text": "Hola", "detected_lang": ""}"#;
        let parsed = parse_delegate_payload(raw).unwrap();
        assert_eq!(parsed.detected_lang, None);
    }
}
