// Ollama text-generation client with bounded sequential retry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::metrics;
use crate::parse::{parse_output, Combination};

/// Sequential generation attempts before giving up.
pub const MAX_ATTEMPTS: u32 = 3;

/// Strings that end generation early. The newline keeps the model on one line.
const STOP_SEQUENCES: &[&str] = &["\n", "INPUT:", "Beispiel:"];

/// A source of parsed combinations for a prompt.
///
/// Returns `None` when no attempt produced a valid combination; exhaustion
/// is not an error, the caller falls back to a default.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Option<Combination>;
}

#[derive(Debug, Error)]
enum AttemptError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model server returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    seed: u64,
    repeat_penalty: f64,
    stop: &'a [&'a str],
    stream: bool,
}

// ── Response envelope ────────────────────────────────────────────────
//
// The model server's response schema is not fixed. The known shapes form a
// typed union, tried in declared order; a body matching none of them yields
// no text rather than a guessed field.

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Flat { response: String },
    Choices { choices: Vec<Choice> },
    Output { output: Vec<FragmentList> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Choice {
    Fragments { content: Vec<Fragment> },
    Text { text: String },
}

#[derive(Deserialize)]
struct FragmentList {
    content: Vec<Fragment>,
}

#[derive(Deserialize)]
struct Fragment {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Extract the generated text, or `None` when the envelope carries none.
    fn into_text(self) -> Option<String> {
        match self {
            GenerateResponse::Flat { response } => Some(response),
            GenerateResponse::Choices { choices } => {
                choices.into_iter().next().map(|choice| match choice {
                    Choice::Fragments { content } => join_fragments(content),
                    Choice::Text { text } => text,
                })
            }
            GenerateResponse::Output { output } => {
                output.into_iter().next().map(|o| join_fragments(o.content))
            }
        }
    }
}

fn join_fragments(fragments: Vec<Fragment>) -> String {
    fragments.into_iter().filter_map(|f| f.text).collect()
}

// ── Ollama client ────────────────────────────────────────────────────

pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    /// The timeout bounds each attempt; a hung model server call fails the
    /// attempt instead of blocking the request.
    pub fn new(base_url: String, model: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url,
            model,
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<Option<Combination>, AttemptError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            max_tokens: 20,
            temperature: 0.1,
            top_p: 0.5,
            seed: 42,
            repeat_penalty: 1.1,
            stop: STOP_SEQUENCES,
            stream: false,
        };

        let res = self.client.post(&url).json(&body).send().await?;
        if !res.status().is_success() {
            return Err(AttemptError::Status(res.status()));
        }

        let raw = res.text().await?;
        // A body that is not one of the known envelopes is treated as raw
        // model text.
        let text = match serde_json::from_str::<GenerateResponse>(&raw) {
            Ok(envelope) => envelope.into_text(),
            Err(_) => Some(raw),
        };
        Ok(text.and_then(|t| parse_output(&t)))
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Option<Combination> {
        for attempt in 1..=MAX_ATTEMPTS {
            let start = Instant::now();
            let result = self.attempt(prompt).await;
            metrics::GENERATION_DURATION_SECONDS.observe(start.elapsed().as_secs_f64());

            match result {
                Ok(Some(combination)) => {
                    metrics::GENERATION_ATTEMPTS_TOTAL
                        .with_label_values(&["ok"])
                        .inc();
                    return Some(combination);
                }
                Ok(None) => {
                    metrics::GENERATION_ATTEMPTS_TOTAL
                        .with_label_values(&["parse_failed"])
                        .inc();
                    tracing::warn!(
                        "attempt {attempt}/{MAX_ATTEMPTS}: no valid combination in model output"
                    );
                }
                Err(e) => {
                    metrics::GENERATION_ATTEMPTS_TOTAL
                        .with_label_values(&["transport_error"])
                        .inc();
                    tracing::warn!("attempt {attempt}/{MAX_ATTEMPTS}: {e}");
                }
            }
        }
        None
    }
}
