use serde::{Deserialize, Serialize};
use crate::regressor::{ModelError, Regressor, FEATURE_COUNT};

/// A single node of a flattened regression tree
///
/// Split nodes send a row to `left` when `x[feature] <= threshold` and to
/// `right` otherwise. Leaves carry the tree output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Regression tree stored as a flat node list, root at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// A tree with a single leaf
    pub fn leaf(value: f64) -> Self {
        Self {
            nodes: vec![TreeNode::Leaf { value }],
        }
    }

    /// Walk the tree from the root to a leaf
    ///
    /// Returns NaN if the walk leaves the node list or revisits a node, which
    /// can only happen for trees that were never validated.
    #[inline]
    pub fn evaluate(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut idx = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return *value,
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    let x = features.get(*feature).copied().unwrap_or(f64::NAN);
                    idx = if x <= *threshold { *left } else { *right };
                }
                None => break,
            }
        }
        f64::NAN
    }

    /// Check structure: child links point forward and in range, features exist
    pub fn validate(&self, tree: usize) -> Result<(), ModelError> {
        let invalid = |reason: String| ModelError::InvalidTree { tree, reason };

        if self.nodes.is_empty() {
            return Err(invalid("tree has no nodes".to_string()));
        }

        let len = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(ModelError::NonFinite(format!("trees[{}].nodes[{}].value", tree, i)));
                    }
                }
                TreeNode::Split { feature, threshold, left, right } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(invalid(format!(
                            "node {} splits on feature {} but only {} features exist",
                            i, feature, FEATURE_COUNT
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::NonFinite(format!("trees[{}].nodes[{}].threshold", tree, i)));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= len {
                            return Err(invalid(format!(
                                "node {} links to node {} (must be in {}..{})",
                                i, child, i + 1, len
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// How the outputs of individual trees are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeAggregation {
    /// Boosted ensembles add tree outputs
    #[default]
    Sum,
    /// Bagged ensembles (random forests) average tree outputs
    Mean,
}

/// Tree ensemble: `base_score + learning_rate * aggregate(trees)`
///
/// A gradient-boosted model uses `Sum` with its shrinkage as
/// `learning_rate`; a random forest or a single decision tree uses `Mean`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub trees: Vec<RegressionTree>,
    #[serde(default)]
    pub aggregation: TreeAggregation,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

fn default_learning_rate() -> f64 { 1.0 }

impl TreeEnsemble {
    pub fn new(trees: Vec<RegressionTree>, aggregation: TreeAggregation) -> Self {
        Self {
            trees,
            aggregation,
            base_score: 0.0,
            learning_rate: default_learning_rate(),
        }
    }

    pub fn with_base_score(mut self, base_score: f64) -> Self {
        self.base_score = base_score;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::InvalidTree {
                tree: 0,
                reason: "ensemble has no trees".to_string(),
            });
        }
        if !self.base_score.is_finite() {
            return Err(ModelError::NonFinite("base_score".to_string()));
        }
        if !self.learning_rate.is_finite() {
            return Err(ModelError::NonFinite("learning_rate".to_string()));
        }

        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i)?;
        }

        Ok(())
    }
}

impl Regressor for TreeEnsemble {
    fn predict(&self, features: [f64; FEATURE_COUNT]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.evaluate(&features)).sum();

        let combined = match self.aggregation {
            TreeAggregation::Sum => total,
            TreeAggregation::Mean => total / self.trees.len() as f64,
        };

        self.base_score + self.learning_rate * combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on engagement at 5.0, then on experience at 2.0
    fn create_test_tree() -> RegressionTree {
        RegressionTree::new(vec![
            TreeNode::Split { feature: 0, threshold: 5.0, left: 1, right: 2 },
            TreeNode::Leaf { value: 1.0 },
            TreeNode::Split { feature: 1, threshold: 2.0, left: 3, right: 4 },
            TreeNode::Leaf { value: 2.0 },
            TreeNode::Leaf { value: 4.0 },
        ])
    }

    #[test]
    fn test_tree_traversal() {
        let tree = create_test_tree();
        assert_eq!(tree.evaluate(&[1.0, 10.0]), 1.0);
        // Threshold is inclusive on the left
        assert_eq!(tree.evaluate(&[5.0, 10.0]), 1.0);
        assert_eq!(tree.evaluate(&[6.0, 2.0]), 2.0);
        assert_eq!(tree.evaluate(&[6.0, 3.0]), 4.0);
    }

    #[test]
    fn test_sum_aggregation() {
        let ensemble = TreeEnsemble::new(
            vec![create_test_tree(), RegressionTree::leaf(0.5)],
            TreeAggregation::Sum,
        )
        .with_base_score(10.0)
        .with_learning_rate(0.5);

        // 10 + 0.5 * (4.0 + 0.5)
        assert_eq!(ensemble.predict([6.0, 3.0]), 12.25);
    }

    #[test]
    fn test_mean_aggregation() {
        let ensemble = TreeEnsemble::new(
            vec![create_test_tree(), RegressionTree::leaf(2.0)],
            TreeAggregation::Mean,
        );

        assert_eq!(ensemble.predict([6.0, 3.0]), 3.0);
    }

    #[test]
    fn test_validate_accepts_well_formed_tree() {
        let ensemble = TreeEnsemble::new(vec![create_test_tree()], TreeAggregation::Sum);
        assert!(ensemble.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_backward_link() {
        let tree = RegressionTree::new(vec![
            TreeNode::Split { feature: 0, threshold: 1.0, left: 0, right: 1 },
            TreeNode::Leaf { value: 1.0 },
        ]);
        assert!(matches!(tree.validate(3), Err(ModelError::InvalidTree { tree: 3, .. })));
    }

    #[test]
    fn test_validate_rejects_unknown_feature() {
        let tree = RegressionTree::new(vec![
            TreeNode::Split { feature: 2, threshold: 1.0, left: 1, right: 2 },
            TreeNode::Leaf { value: 1.0 },
            TreeNode::Leaf { value: 2.0 },
        ]);
        assert!(matches!(tree.validate(0), Err(ModelError::InvalidTree { .. })));
    }

    #[test]
    fn test_validate_rejects_empty() {
        let ensemble = TreeEnsemble::new(vec![], TreeAggregation::Mean);
        assert!(ensemble.validate().is_err());

        let ensemble = TreeEnsemble::new(vec![RegressionTree::new(vec![])], TreeAggregation::Mean);
        assert!(ensemble.validate().is_err());
    }

    #[test]
    fn test_unvalidated_cycle_yields_nan() {
        let tree = RegressionTree::new(vec![
            TreeNode::Split { feature: 0, threshold: 1.0, left: 0, right: 0 },
        ]);
        assert!(tree.evaluate(&[0.0, 0.0]).is_nan());
    }

    #[test]
    fn test_node_deserialization() {
        let split: TreeNode =
            serde_json::from_str(r#"{"feature": 1, "threshold": 0.5, "left": 1, "right": 2}"#).unwrap();
        assert!(matches!(split, TreeNode::Split { feature: 1, .. }));

        let leaf: TreeNode = serde_json::from_str(r#"{"value": 3.5}"#).unwrap();
        assert_eq!(leaf, TreeNode::Leaf { value: 3.5 });
    }
}
