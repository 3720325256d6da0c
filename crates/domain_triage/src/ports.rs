//! Collaborator port traits
//!
//! The imaging inference and text classification models are external
//! collaborators; the domain only specifies their boundary. Adapters in
//! `infra_agents` implement these traits over HTTP, tests implement them
//! with mocks.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, PortError};

use crate::verdict::Verdict;

/// Output of the imaging inference collaborator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InferenceOutcome {
    /// Whether the classifier called the image positive
    pub positive: bool,
    /// Classifier confidence in [0, 1]
    pub probability: f64,
}

/// Labeled reference texts for the text-classification fallback
#[derive(Debug, Clone, Default)]
pub struct LabeledExamples {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl LabeledExamples {
    /// True when no reference material is available at all
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

/// Imaging inference collaborator boundary
#[async_trait]
pub trait ImagingInference: DomainPort {
    /// Classifies the stored image, returning a positive flag and probability.
    async fn infer(&self, image_path: &Path) -> Result<InferenceOutcome, PortError>;

    /// Produces a free-text explanation for an inference outcome.
    async fn explain(
        &self,
        image_path: &Path,
        outcome: &InferenceOutcome,
    ) -> Result<String, PortError>;
}

/// Text-classification collaborator boundary
///
/// Invoked only when the threshold rules are ambiguous and reference material
/// exists. Implementations must return an error rather than a verdict when
/// the collaborator replies with anything other than the three tokens; the
/// caller then degrades to the fallback rule.
#[async_trait]
pub trait TextClassifier: DomainPort {
    async fn classify(
        &self,
        report_text: &str,
        examples: &LabeledExamples,
    ) -> Result<Verdict, PortError>;
}
