//! Generative-content client for the admin editor.
//!
//! Talks to the Gemini `generateContent` REST endpoint. Model names rotate
//! out of service upstream, so the client carries a fixed, ordered candidate
//! list and walks it: a 404 for one model means "try the next", any other
//! failure is a real error. When every candidate is gone the caller still
//! gets a usable HTML scaffold instead of an empty editor.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AppError;
use crate::trace_ctx;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Candidate models, tried strictly in order.
pub const DEFAULT_MODELS: &[&str] = &[
    "gemini-1.5-flash-latest",
    "gemini-1.5-flash",
    "gemini-1.0-pro-latest",
    "gemini-1.0-pro",
    "gemini-pro",
];

#[derive(Clone)]
pub struct ContentGenerator {
    client: reqwest::Client,
    api_key: String,
    models: Vec<String>,
}

impl fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("api_key", &"[REDACTED]")
            .field("models", &self.models)
            .finish()
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

enum ModelCall {
    Text(String),
    ModelMissing,
}

impl ContentGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Read `GEMINI_API_KEY`; a missing key means generation is off, not an
    /// error.
    pub fn from_env() -> Option<Self> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Some(Self::new(key)),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    async fn call_model(&self, model: &str, prompt: &str) -> Result<ModelCall, AppError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig::default(),
        };

        let url = format!("{API_BASE}/{model}:generateContent");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ai_generation_failed(format!("request failed: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(ModelCall::ModelMissing);
        }
        if !response.status().is_success() {
            return Err(AppError::ai_generation_failed(format!(
                "upstream returned {}",
                response.status()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::ai_generation_failed(format!("malformed response: {e}")))?;
        match extract_text(parsed) {
            Some(text) => Ok(ModelCall::Text(text)),
            None => Err(AppError::ai_generation_failed(
                "response contained no text candidates",
            )),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<Option<String>, AppError> {
        let trace_id = trace_ctx::trace_id();
        for model in &self.models {
            match self.call_model(model, prompt).await? {
                ModelCall::Text(text) => {
                    info!(trace_id = %trace_id, model = %model, chars = text.len(), "content generated");
                    return Ok(Some(text));
                }
                ModelCall::ModelMissing => {
                    warn!(trace_id = %trace_id, model = %model, "model not found, trying next candidate");
                }
            }
        }
        Ok(None)
    }

    /// Generate article HTML about `subject`. Falls back to a static scaffold
    /// when every candidate model has been retired upstream.
    pub async fn generate_article(&self, subject: &str) -> Result<String, AppError> {
        let prompt = format!(
            "Write a comprehensive, well-structured blog article about \"{subject}\" \
             in simple HTML (h2/h3/p/ul tags only, no html/head/body wrapper)."
        );
        match self.generate(&prompt).await? {
            Some(text) => Ok(text),
            None => {
                warn!(subject = %subject, "all candidate models exhausted, using fallback scaffold");
                Ok(fallback_article(subject))
            }
        }
    }

    /// Propose a blog title from an optional seed. Never fails the request:
    /// on any trouble the seed (or a stock topic) comes back instead.
    pub async fn generate_topic(&self, seed: &str) -> String {
        let seed = seed.trim();
        let prompt = format!(
            "You are a content strategist. Given the optional seed: \"{seed}\" generate a \
             concise, compelling blog post title (6-12 words) suitable for a public audience.\n\
             Output format (exactly):\nTitle: <the title>\n\
             If no seed is provided, propose a timely, useful blog topic."
        );
        match self.generate(&prompt).await {
            Ok(Some(text)) => parse_title_line(&text, seed),
            Ok(None) | Err(_) => default_topic(seed),
        }
    }
}

fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .map(|p| p.text)
        .reduce(|mut acc, part| {
            acc.push_str(&part);
            acc
        })
        .filter(|text| !text.trim().is_empty())
}

/// Pull the `Title:` line out of a model reply, or fall back to the first
/// non-empty line.
fn parse_title_line(text: &str, seed: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    // get(..6): the reply is arbitrary text, byte 6 may not be a char boundary
    let title_line = lines
        .iter()
        .find(|l| l.get(..6).is_some_and(|p| p.eq_ignore_ascii_case("title:")))
        .map(|l| l[6..].trim())
        .or_else(|| lines.first().copied());
    match title_line {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => default_topic(seed),
    }
}

fn default_topic(seed: &str) -> String {
    if seed.is_empty() {
        "A useful topic to write about today".to_string()
    } else {
        seed.to_string()
    }
}

fn fallback_article(subject: &str) -> String {
    format!(
        "<h2>About {subject}</h2>\n\
         <p>Welcome to our comprehensive exploration of {subject}. This topic has gained \
         significant attention in recent years due to its transformative potential across \
         various industries and aspects of daily life.</p>\n\
         <h3>Understanding the Core Concepts</h3>\n\
         <p>At its foundation, {subject} represents a shift in how we approach \
         problem-solving and innovation. The principles behind it continue to evolve as \
         researchers and practitioners uncover new applications.</p>\n\
         <h3>Key Applications and Benefits</h3>\n\
         <ul>\n\
         <li><strong>Enhanced Efficiency:</strong> Streamlining processes and reducing costs</li>\n\
         <li><strong>Improved Decision-Making:</strong> Leveraging data-driven insights</li>\n\
         <li><strong>Innovation Acceleration:</strong> Fostering breakthrough solutions</li>\n\
         </ul>\n\
         <h3>Future Outlook</h3>\n\
         <p>As technology continues to advance, the potential applications of {subject} are \
         expected to expand significantly. Staying informed about emerging trends will be \
         crucial for anyone seeking to keep their edge.</p>\n\
         <h3>Conclusion</h3>\n\
         <p>{subject} is more than a technological advancement. By understanding its \
         principles and potential applications, individuals and organizations can position \
         themselves for success in a complex and dynamic landscape.</p>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_line_is_extracted() {
        let text = "Title: The Future of Edge Computing\nTags: edge, cloud, infra";
        assert_eq!(parse_title_line(text, ""), "The Future of Edge Computing");
    }

    #[test]
    fn title_parsing_is_case_insensitive() {
        assert_eq!(parse_title_line("TITLE: Rust in Production", ""), "Rust in Production");
    }

    #[test]
    fn first_line_is_used_when_no_title_marker() {
        assert_eq!(parse_title_line("Edge Computing 101\nmore text", ""), "Edge Computing 101");
    }

    #[test]
    fn multibyte_first_line_is_handled() {
        // A non-ASCII char straddling the marker width must not panic
        assert_eq!(parse_title_line("ab€€x\nmore", "seed"), "ab€€x");
        assert_eq!(parse_title_line("Title: Café Économics", ""), "Café Économics");
    }

    #[test]
    fn empty_reply_falls_back_to_seed_then_stock_topic() {
        assert_eq!(parse_title_line("", "databases"), "databases");
        assert_eq!(parse_title_line("", ""), "A useful topic to write about today");
    }

    #[test]
    fn fallback_article_mentions_subject() {
        let html = fallback_article("quantum computing");
        assert!(html.contains("<h2>About quantum computing</h2>"));
        assert!(html.contains("Conclusion"));
    }

    #[test]
    fn default_models_are_ordered_flash_first() {
        assert_eq!(DEFAULT_MODELS[0], "gemini-1.5-flash-latest");
        assert_eq!(DEFAULT_MODELS[DEFAULT_MODELS.len() - 1], "gemini-pro");
    }
}
