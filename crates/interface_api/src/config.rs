//! API configuration

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use infra_agents::AgentServicesConfig;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Data directory holding the claim database and submissions
    pub data_dir: PathBuf,
    /// Directory holding the labeled reference examples
    pub reference_dir: PathBuf,
    /// Worker polling interval in seconds
    pub poll_interval_secs: u64,
    /// Base URL of the imaging inference service
    pub imaging_url: String,
    /// Base URL of the text-classification service
    pub text_classifier_url: String,
    /// Model name passed to the text-classification service
    pub text_classifier_model: String,
    /// Timeout in seconds bounding every collaborator call
    pub agent_timeout_secs: u64,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            data_dir: PathBuf::from("data"),
            reference_dir: PathBuf::from("reference"),
            poll_interval_secs: 2,
            imaging_url: "http://localhost:8090".to_string(),
            text_classifier_url: "http://localhost:11434".to_string(),
            text_classifier_model: "phi3:latest".to_string(),
            agent_timeout_secs: 60,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("TRIAGE"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the worker polling interval
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Collaborator service configuration derived from this config
    pub fn agent_services(&self) -> AgentServicesConfig {
        AgentServicesConfig {
            imaging_url: self.imaging_url.clone(),
            text_classifier_url: self.text_classifier_url.clone(),
            text_classifier_model: self.text_classifier_model.clone(),
            reference_dir: self.reference_dir.clone(),
            call_timeout: Duration::from_secs(self.agent_timeout_secs),
        }
    }
}
