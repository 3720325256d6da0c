//! Text-classification service adapter
//!
//! The classifier sits behind a generate-style HTTP endpoint. The prompt
//! embeds the labeled golden examples, then the report under classification,
//! then an instruction to answer with exactly one word. Any reply that does
//! not contain one of the three verdict tokens is a malformed-response error;
//! the caller degrades to the threshold fallback rule.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{DomainPort, PortError};
use domain_triage::ports::{LabeledExamples, TextClassifier};
use domain_triage::Verdict;

/// HTTP client for the external text-classification service
pub struct TextClassifierClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl TextClassifierClient {
    /// Creates a client for the service at `base_url` using `model`.
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, PortError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PortError::Internal {
                message: "failed to build text-classification HTTP client".to_string(),
                source: Some(Box::new(err)),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout,
        })
    }
}

/// Request body for the generate endpoint
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response body from the generate endpoint
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Builds the one-word classification prompt from the report and the
/// labeled reference examples.
pub fn build_classification_prompt(report_text: &str, examples: &LabeledExamples) -> String {
    fn block(label: &str, texts: &[String]) -> String {
        if texts.is_empty() {
            return String::new();
        }
        let mut parts = vec![format!("--- {label} ---")];
        for (index, text) in texts.iter().enumerate() {
            parts.push(format!("[Example {}]\n{}", index + 1, text));
        }
        parts.join("\n\n")
    }

    let positive_block = block(
        "Golden examples labeled POSITIVE (pneumonia)",
        &examples.positive,
    );
    let negative_block = block(
        "Golden examples labeled NEGATIVE (no pneumonia)",
        &examples.negative,
    );

    format!(
        "You are classifying a hematology report for pneumonia. Use the golden examples below as reference.\n\n\
         {positive_block}\n\n{negative_block}\n\n\
         --- Report to classify ---\n{report}\n\n\
         Based on the golden examples, is this report more like POSITIVE (pneumonia) or NEGATIVE (no pneumonia)? \
         Reply with exactly one word: true, false, or uncertain.",
        report = report_text.trim()
    )
}

impl DomainPort for TextClassifierClient {}

#[async_trait]
impl TextClassifier for TextClassifierClient {
    async fn classify(
        &self,
        report_text: &str,
        examples: &LabeledExamples,
    ) -> Result<Verdict, PortError> {
        let prompt = build_classification_prompt(report_text, examples);
        let request = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
        };
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    PortError::timeout("text classification", self.timeout.as_millis() as u64)
                } else if err.is_connect() {
                    PortError::Connection {
                        message: format!(
                            "text-classification service unreachable at {}",
                            self.base_url
                        ),
                        source: Some(Box::new(err)),
                    }
                } else {
                    PortError::Internal {
                        message: "text-classification call failed".to_string(),
                        source: Some(Box::new(err)),
                    }
                }
            })?;
        if !response.status().is_success() {
            return Err(PortError::ServiceUnavailable {
                service: format!("text classification ({})", response.status()),
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|err| PortError::malformed(format!("text-classification reply: {err}")))?;

        let reply = body.response.trim();
        debug!(reply, "text classifier replied");
        Verdict::parse_token(reply).ok_or_else(|| {
            let preview: String = reply.chars().take(80).collect();
            PortError::malformed(format!("classifier replied with no verdict token: {preview:?}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_examples_and_report() {
        let examples = LabeledExamples {
            positive: vec!["WBC Count: 14.2".to_string()],
            negative: vec!["WBC Count: 5.9".to_string()],
        };
        let prompt = build_classification_prompt("WBC Count: 12.0", &examples);

        assert!(prompt.contains("POSITIVE (pneumonia)"));
        assert!(prompt.contains("[Example 1]\nWBC Count: 14.2"));
        assert!(prompt.contains("NEGATIVE (no pneumonia)"));
        assert!(prompt.contains("--- Report to classify ---\nWBC Count: 12.0"));
        assert!(prompt.contains("Reply with exactly one word"));
    }

    #[test]
    fn test_prompt_omits_empty_blocks() {
        let prompt = build_classification_prompt("text", &LabeledExamples::default());
        assert!(!prompt.contains("---  ---"));
        assert!(!prompt.contains("[Example"));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transient() {
        let client = TextClassifierClient::new(
            "http://127.0.0.1:9",
            "phi3:latest",
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client
            .classify("WBC Count: 12.0", &LabeledExamples::default())
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }
}
