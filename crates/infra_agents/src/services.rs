//! Explicitly constructed collaborator service handles

use std::path::PathBuf;
use std::time::Duration;

use core_kernel::PortError;

use crate::imaging::ImagingServiceClient;
use crate::reference::ReferenceLibrary;
use crate::textclass::TextClassifierClient;

/// Configuration for the collaborator services
#[derive(Debug, Clone)]
pub struct AgentServicesConfig {
    /// Base URL of the imaging inference service
    pub imaging_url: String,
    /// Base URL of the text-classification service
    pub text_classifier_url: String,
    /// Model name passed to the text-classification service
    pub text_classifier_model: String,
    /// Directory holding the labeled reference examples
    pub reference_dir: PathBuf,
    /// Timeout bounding every external call
    pub call_timeout: Duration,
}

/// The collaborator service handles, constructed once at startup and passed
/// to the pipelines.
///
/// Construction failure surfaces immediately as a typed result.
pub struct AgentServices {
    pub imaging: ImagingServiceClient,
    pub text_classifier: TextClassifierClient,
    pub reference: ReferenceLibrary,
}

impl AgentServices {
    /// Builds every service handle from the configuration
    pub fn connect(config: &AgentServicesConfig) -> Result<Self, PortError> {
        Ok(Self {
            imaging: ImagingServiceClient::new(&config.imaging_url, config.call_timeout)?,
            text_classifier: TextClassifierClient::new(
                &config.text_classifier_url,
                &config.text_classifier_model,
                config.call_timeout,
            )?,
            reference: ReferenceLibrary::new(config.reference_dir.clone()),
        })
    }
}
