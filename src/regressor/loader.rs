use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use crate::regressor::{LinearModel, ModelError, Regressor, TreeEnsemble, FEATURE_NAMES};

/// Model family stored in an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Linear,
    TreeEnsemble,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Linear => write!(f, "linear"),
            ModelKind::TreeEnsemble => write!(f, "tree_ensemble"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

/// On-disk model artifact
///
/// ```json
/// {
///   "kind": "linear",
///   "feature_names": ["engagement_score", "experience_score"],
///   "coefficients": [0.62, 0.31],
///   "intercept": 1.15
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    pub model: ModelSpec,
}

impl ModelArtifact {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn kind(&self) -> ModelKind {
        match self.model {
            ModelSpec::Linear(_) => ModelKind::Linear,
            ModelSpec::TreeEnsemble(_) => ModelKind::TreeEnsemble,
        }
    }

    /// Validate the artifact against the service's input shape
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES) {
                return Err(ModelError::FeatureNames {
                    expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                    got: names.clone(),
                });
            }
        }

        match &self.model {
            ModelSpec::Linear(model) => model.validate(),
            ModelSpec::TreeEnsemble(model) => model.validate(),
        }
    }

    /// Validate and convert into a shareable regressor
    pub fn into_regressor(self) -> Result<Arc<dyn Regressor>, ModelError> {
        self.validate()?;

        Ok(match self.model {
            ModelSpec::Linear(model) => Arc::new(model),
            ModelSpec::TreeEnsemble(model) => Arc::new(model),
        })
    }
}

/// A validated model, ready to serve
#[derive(Clone)]
pub struct LoadedModel {
    pub regressor: Arc<dyn Regressor>,
    pub kind: ModelKind,
    pub path: PathBuf,
    pub loaded_at: DateTime<Utc>,
}

impl fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModel")
            .field("kind", &self.kind)
            .field("path", &self.path)
            .field("loaded_at", &self.loaded_at)
            .finish_non_exhaustive()
    }
}

/// Read, decode and validate the model artifact at `path`
///
/// Any failure here is a startup error: the service cannot serve without a
/// model that accepts its two-feature input.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<LoadedModel, ModelError> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let artifact = ModelArtifact::from_slice(&bytes)?;
    let kind = artifact.kind();
    let regressor = artifact.into_regressor()?;

    tracing::debug!("Decoded {} model from {} ({} bytes)", kind, path.display(), bytes.len());

    Ok(LoadedModel {
        regressor,
        kind,
        path: path.to_path_buf(),
        loaded_at: Utc::now(),
    })
}
