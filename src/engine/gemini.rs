use crate::engine::{DuplicateRecord, NameMatcher, RawEntry};
use crate::error::AnalyzeError;

#[cfg(feature = "async-gemini")]
use std::future::Future;
#[cfg(feature = "async-gemini")]
use std::pin::Pin;

/// Alternate `NameMatcher` that delegates grouping to the Google Gemini API.
///
/// Unlike [`crate::engine::ExactMatcher`], the model is asked to merge
/// near-spellings ("John Smith" vs "Jon Smith"), so the grouping is not
/// deterministic. Callers must opt in explicitly; the engine never selects
/// this matcher on its own.
///
/// # Example
///
/// ```no_run
/// use namedup::gemini::GeminiMatcher;
///
/// let matcher = GeminiMatcher::new("your-api-key".to_string());
/// // or from the GEMINI_API_KEY environment variable:
/// let matcher = GeminiMatcher::from_env().unwrap();
/// ```
pub struct GeminiMatcher {
    api_key: String,
    model: String,
}

impl std::fmt::Debug for GeminiMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiMatcher")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiMatcher {
    /// Create a new `GeminiMatcher` with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: "gemini-3-flash-preview".to_string(),
        }
    }

    /// Create a new `GeminiMatcher` by reading the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, AnalyzeError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AnalyzeError::Matcher {
            reason: "GEMINI_API_KEY environment variable not set".to_string(),
        })?;
        Ok(Self::new(api_key))
    }

    /// Set a custom model name (default: `gemini-3-flash-preview`).
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

/// Build the detection prompt for the given entries.
fn build_prompt(entries: &[RawEntry]) -> String {
    let mut content = String::new();
    for entry in entries {
        content.push_str(&entry.text);
        content.push('\n');
    }
    format!(
        "You are an expert in identifying and counting duplicate names in a text file, \
         even with slight variations.\n\n\
         Analyze the following file content and provide a list of duplicate names and \
         their normalized count.\n\n\
         File Content:\n{content}\n\
         Output the results as a JSON array where each object has a 'name' (the normalized \
         name) and a 'count' (the number of occurrences).\n\
         Consider names like 'John Smith' and 'Jon Smith' as potential duplicates and \
         normalize them appropriately.\n\
         If no duplicates are found, return an empty array.\n\
         Make sure the output is a valid JSON. Do not return any explanations, only the \
         JSON array."
    )
}

/// Build the `generateContent` request body for the given prompt.
fn build_request(prompt: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json"
        }
    })
}

/// Parse the text payload from a Gemini `generateContent` JSON response body.
///
/// Extracts `candidates[0].content.parts[0].text` and parses it as a JSON
/// array of `{name, count}` objects. Counts of 1 are dropped so a model that
/// echoes singletons still satisfies the duplicates-only contract.
fn parse_response(body: &str) -> Result<Vec<DuplicateRecord>, AnalyzeError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| AnalyzeError::Matcher {
            reason: format!("failed to parse Gemini response: {e}"),
        })?;

    // Check for API error
    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error");
        return Err(AnalyzeError::Matcher {
            reason: format!("Gemini API error: {message}"),
        });
    }

    let text = value
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .ok_or_else(|| AnalyzeError::Matcher {
            reason:
                "unexpected Gemini response structure: missing candidates[0].content.parts[0].text"
                    .to_string(),
        })?;

    parse_records(text)
}

/// Parse the model's JSON array of `{name, count}` objects.
fn parse_records(text: &str) -> Result<Vec<DuplicateRecord>, AnalyzeError> {
    let text = text.trim();
    // Some models wrap the payload in a Markdown code fence despite the prompt.
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .map(|t| t.strip_suffix("```").unwrap_or(t))
        .unwrap_or(text)
        .trim();

    let items: serde_json::Value =
        serde_json::from_str(text).map_err(|e| AnalyzeError::Matcher {
            reason: format!("Gemini returned invalid JSON: {e}"),
        })?;

    let array = items.as_array().ok_or_else(|| AnalyzeError::Matcher {
        reason: "Gemini response is not a JSON array".to_string(),
    })?;

    let mut records = Vec::new();
    for item in array {
        let name = item
            .get("name")
            .and_then(|n| n.as_str())
            .ok_or_else(|| AnalyzeError::Matcher {
                reason: "Gemini item is missing 'name'".to_string(),
            })?;
        let count = item
            .get("count")
            .and_then(|c| c.as_u64())
            .ok_or_else(|| AnalyzeError::Matcher {
                reason: "Gemini item is missing 'count'".to_string(),
            })?;
        if count > 1 {
            records.push(DuplicateRecord {
                display_name: name.to_string(),
                count,
            });
        }
    }

    Ok(records)
}

impl NameMatcher for GeminiMatcher {
    fn group(&self, entries: &[RawEntry]) -> Result<Vec<DuplicateRecord>, AnalyzeError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let request_body = build_request(&build_prompt(entries));

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );

        let json_body = request_body.to_string();

        let response = ureq::post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .send(json_body.as_bytes())
            .map_err(|e| AnalyzeError::Matcher {
                reason: format!("Gemini API request failed: {e}"),
            })?;

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| AnalyzeError::Matcher {
                reason: format!("failed to read Gemini response body: {e}"),
            })?;

        parse_response(&body)
    }
}

/// Async `AsyncNameMatcher` that uses the Google Gemini API via `reqwest`.
///
/// Requires the `async-gemini` feature flag.
///
/// # Example
///
/// ```no_run
/// use namedup::gemini::AsyncGeminiMatcher;
///
/// let matcher = AsyncGeminiMatcher::new("your-api-key".to_string());
/// // or from the GEMINI_API_KEY environment variable:
/// let matcher = AsyncGeminiMatcher::from_env().unwrap();
/// ```
#[cfg(feature = "async-gemini")]
pub struct AsyncGeminiMatcher {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[cfg(feature = "async-gemini")]
impl std::fmt::Debug for AsyncGeminiMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncGeminiMatcher")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(feature = "async-gemini")]
impl AsyncGeminiMatcher {
    /// Create a new `AsyncGeminiMatcher` with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: "gemini-3-flash-preview".to_string(),
        }
    }

    /// Create a new `AsyncGeminiMatcher` by reading the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, AnalyzeError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AnalyzeError::Matcher {
            reason: "GEMINI_API_KEY environment variable not set".to_string(),
        })?;
        Ok(Self::new(api_key))
    }

    /// Set a custom model name (default: `gemini-3-flash-preview`).
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

#[cfg(feature = "async-gemini")]
impl crate::engine::AsyncNameMatcher for AsyncGeminiMatcher {
    fn group<'a>(
        &'a self,
        entries: &'a [RawEntry],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DuplicateRecord>, AnalyzeError>> + Send + 'a>>
    {
        Box::pin(async move {
            if entries.is_empty() {
                return Ok(Vec::new());
            }

            let request_body = build_request(&build_prompt(entries));

            let url = format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                self.model
            );

            let response = self
                .client
                .post(&url)
                .header("Content-Type", "application/json")
                .header("x-goog-api-key", &self.api_key)
                .json(&request_body)
                .send()
                .await
                .map_err(|e| AnalyzeError::Matcher {
                    reason: format!("Gemini API request failed: {e}"),
                })?;

            let body = response.text().await.map_err(|e| AnalyzeError::Matcher {
                reason: format!("failed to read Gemini response body: {e}"),
            })?;

            parse_response(&body)
        })
    }
}
