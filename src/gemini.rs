use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use crate::error::SimplifyError;

// ── Constants ────────────────────────────────────────────────────────────────

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// The fixed instruction sent with every screenshot. The model is asked for
/// pure JSON matching `PageAnalysis`.
pub const SIMPLIFY_PROMPT: &str = r#"
You are a Senior SDET (Software Development Engineer in Test).
Your job is to reverse-engineer this UI screenshot into robust DOM selectors.

Task: Identify the 3 most critical actions for a non-technical user (The "Happy Path").

For each action, provide a "Robust Locator Strategy":
1. "label": The visible text (e.g. "Sign In").
2. "type": Is it an "input" (typing) or "clickable" (button/link)?
3. "icon_name": A Google Material Icon name (e.g. "search", "person", "shopping_cart").
4. "keywords": A technical array of at least 8 strings. Include:
   - The visible text (e.g. "Sign In")
   - Lowercase variations (e.g. "sign in")
   - Likely HTML IDs (e.g. "login-btn", "nav-link-accountList")
   - Likely ARIA labels (e.g. "Submit Search")
   - Common synonyms (e.g. if text is "Go", keyword includes "search", "submit")

Return pure JSON:
{
    "page_summary": "Amazon Product Page",
    "primary_actions": [
        {
          "label": "Add to Cart",
          "type": "clickable",
          "icon_name": "cart",
          "keywords": ["add to cart", "add-to-cart-button", "submit.add-to-cart", "a-button-input", "purchase", "buy"]
        }
    ]
}
"#;

// ── Completion seam ──────────────────────────────────────────────────────────

/// One prompt-plus-image completion call. The handler only depends on this
/// trait, so tests can substitute a stub for the real Gemini client.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Submit the prompt and image, returning the model's raw text output.
    async fn complete(
        &self,
        prompt: &str,
        image_bytes: &[u8],
        mime_type: &str,
    ) -> Result<String, SimplifyError>;
}

// ── Gemini client ────────────────────────────────────────────────────────────

/// Client for the Gemini `generateContent` REST API, configured to return
/// JSON-formatted text.
pub struct GeminiClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_endpoint(api_key, model, GEMINI_ENDPOINT)
    }

    /// Custom endpoint, used to point tests at a local server.
    pub fn with_endpoint(api_key: &str, model: &str, endpoint: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(
        &self,
        prompt: &str,
        image_bytes: &[u8],
        mime_type: &str,
    ) -> Result<String, SimplifyError> {
        use base64::Engine;
        let data = base64::engine::general_purpose::STANDARD.encode(image_bytes);

        let body = json!({
            "contents": [{
                "parts": [
                    {"text": prompt},
                    {"inline_data": {"mime_type": mime_type, "data": data}}
                ]
            }],
            "generationConfig": {"responseMimeType": "application/json"}
        });

        let response = self
            .client
            .post(self.request_url())
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SimplifyError::Upstream(format!("Gemini request timed out: {}", e))
                } else if e.is_connect() {
                    SimplifyError::Upstream(format!("Gemini connection failed: {}", e))
                } else {
                    SimplifyError::Upstream(format!("Gemini request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SimplifyError::Upstream(format!(
                "Gemini HTTP {}: {}",
                status, text
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| SimplifyError::Upstream(format!("Failed to read Gemini response: {}", e)))?;

        extract_candidate_text(&value)
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a `generateContent`
/// response. Missing text (safety block, empty candidates) is an upstream
/// error carrying the raw body for diagnosis.
fn extract_candidate_text(value: &Value) -> Result<String, SimplifyError> {
    value["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| {
            SimplifyError::Upstream(format!("Gemini returned no candidate text: {}", value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_text_is_extracted_and_trimmed() {
        let value = json!({
            "candidates": [{
                "content": {"parts": [{"text": "  {\"page_summary\": \"x\"}  "}]}
            }]
        });
        let text = extract_candidate_text(&value).unwrap();
        assert_eq!(text, "{\"page_summary\": \"x\"}");
    }

    #[test]
    fn empty_candidates_is_an_upstream_error() {
        let value = json!({"candidates": []});
        assert!(matches!(
            extract_candidate_text(&value).unwrap_err(),
            SimplifyError::Upstream(_)
        ));
    }

    #[test]
    fn blocked_response_is_an_upstream_error() {
        let value = json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        });
        assert!(matches!(
            extract_candidate_text(&value).unwrap_err(),
            SimplifyError::Upstream(_)
        ));
    }

    #[test]
    fn request_url_includes_model_and_key() {
        let client = GeminiClient::new("test-key", "gemini-3-flash-preview");
        assert_eq!(
            client.request_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent?key=test-key"
        );
    }
}
