//! oncoai-common: Shared types, errors, and configuration used across all OncoAI crates.

pub mod error;
pub mod features;
pub mod session;
pub mod prediction;
pub mod client_config;

// Re-export commonly used types
pub use error::{OncoaiError, Result};
pub use features::{FeatureVector, FEATURE_COUNT, GENES};
pub use session::{Session, UserInfo};
pub use prediction::{PredictionResult, SurvivalPrediction, BatchPredictions};
pub use client_config::{ClientConfig, FieldLayout};
