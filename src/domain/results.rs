use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Illustrative final metrics shown on the results view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalMetrics {
    pub accuracy: f64,
    pub loss: f64,
    pub f1_score: f64,
    pub precision: f64,
    pub recall: f64,
    pub training_time: String,
}

impl Default for FinalMetrics {
    fn default() -> Self {
        Self {
            accuracy: 94.2,
            loss: 0.12,
            f1_score: 0.93,
            precision: 0.95,
            recall: 0.91,
            training_time: "12:34".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Pending,
    Deployed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub status: DeploymentStatus,
    pub url: Option<String>,
}

/// Placeholder artifact returned by the simulated download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Fake inference key; never stored anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub key: String,
    /// Short prefix safe to display after the key is dismissed
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
}
