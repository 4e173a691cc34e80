// Regression model exports
pub mod linear;
pub mod loader;
pub mod tree;

use thiserror::Error;

pub use linear::LinearModel;
pub use loader::{load_model, LoadedModel, ModelArtifact, ModelKind, ModelSpec};
pub use tree::{RegressionTree, TreeAggregation, TreeEnsemble, TreeNode};

/// Number of input features every model must accept
pub const FEATURE_COUNT: usize = 2;

/// Feature names in the column order the model was trained on
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["engagement_score", "experience_score"];

/// A trained regression function over a single two-column row.
///
/// Implementations are immutable once constructed and are shared across
/// request handlers, hence the `Send + Sync` bound.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: [f64; FEATURE_COUNT]) -> f64;
}

/// Errors that can occur while loading a model artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode model artifact: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Shape mismatch: model expects {got} features, service provides {expected}")]
    Shape { expected: usize, got: usize },

    #[error("Feature name mismatch: expected {expected:?}, got {got:?}")]
    FeatureNames {
        expected: Vec<String>,
        got: Vec<String>,
    },

    #[error("Invalid tree {tree}: {reason}")]
    InvalidTree { tree: usize, reason: String },

    #[error("Non-finite model parameter: {0}")]
    NonFinite(String),
}
