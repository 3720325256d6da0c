//! Imaging inference service adapter

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{DomainPort, PortError};
use domain_triage::ports::{ImagingInference, InferenceOutcome};

/// HTTP client for the external imaging inference service
pub struct ImagingServiceClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl ImagingServiceClient {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PortError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PortError::Internal {
                message: "failed to build imaging HTTP client".to_string(),
                source: Some(Box::new(err)),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    fn map_request_error(&self, operation: &str, err: reqwest::Error) -> PortError {
        if err.is_timeout() {
            PortError::timeout(operation, self.timeout.as_millis() as u64)
        } else if err.is_connect() {
            PortError::Connection {
                message: format!("imaging service unreachable at {}", self.base_url),
                source: Some(Box::new(err)),
            }
        } else {
            PortError::Internal {
                message: format!("imaging service call failed: {operation}"),
                source: Some(Box::new(err)),
            }
        }
    }
}

#[derive(Serialize)]
struct InferRequest<'a> {
    image_path: &'a str,
}

#[derive(Deserialize)]
struct InferResponse {
    positive: bool,
    probability: f64,
}

#[derive(Serialize)]
struct ExplainRequest<'a> {
    image_path: &'a str,
    positive: bool,
    probability: f64,
}

#[derive(Deserialize)]
struct ExplainResponse {
    explanation: String,
}

impl DomainPort for ImagingServiceClient {}

#[async_trait]
impl ImagingInference for ImagingServiceClient {
    async fn infer(&self, image_path: &Path) -> Result<InferenceOutcome, PortError> {
        let url = format!("{}/v1/infer", self.base_url);
        let path_text = image_path.display().to_string();
        let request = InferRequest {
            image_path: &path_text,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| self.map_request_error("imaging inference", err))?;
        if !response.status().is_success() {
            return Err(PortError::ServiceUnavailable {
                service: format!("imaging inference ({})", response.status()),
            });
        }

        let body: InferResponse = response
            .json()
            .await
            .map_err(|err| PortError::malformed(format!("imaging inference reply: {err}")))?;
        if !(0.0..=1.0).contains(&body.probability) {
            return Err(PortError::validation(format!(
                "probability out of range: {}",
                body.probability
            )));
        }

        debug!(
            probability = body.probability,
            positive = body.positive,
            "imaging inference complete"
        );
        Ok(InferenceOutcome {
            positive: body.positive,
            probability: body.probability,
        })
    }

    async fn explain(
        &self,
        image_path: &Path,
        outcome: &InferenceOutcome,
    ) -> Result<String, PortError> {
        let url = format!("{}/v1/explain", self.base_url);
        let path_text = image_path.display().to_string();
        let request = ExplainRequest {
            image_path: &path_text,
            positive: outcome.positive,
            probability: outcome.probability,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| self.map_request_error("imaging explanation", err))?;
        if !response.status().is_success() {
            return Err(PortError::ServiceUnavailable {
                service: format!("imaging explanation ({})", response.status()),
            });
        }

        let body: ExplainResponse = response
            .json()
            .await
            .map_err(|err| PortError::malformed(format!("imaging explanation reply: {err}")))?;
        Ok(body.explanation)
    }
}
