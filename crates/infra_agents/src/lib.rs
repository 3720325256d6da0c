//! Collaborator Adapters
//!
//! This crate implements the domain's collaborator ports over HTTP: the
//! imaging inference service and the text-classification service, plus the
//! on-disk library of labeled reference examples the classifier is primed
//! with. Service handles are constructed explicitly at startup; construction
//! failure is a typed result, not a cached error discovered on first use.

pub mod imaging;
pub mod reference;
pub mod services;
pub mod textclass;

pub use imaging::ImagingServiceClient;
pub use reference::ReferenceLibrary;
pub use services::{AgentServices, AgentServicesConfig};
pub use textclass::TextClassifierClient;
