use serde::{Deserialize, Serialize};

use super::Model;
use crate::{
    entities::Prediction,
    error::{feature_count_error, model_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    name: String,
    #[serde(flatten)]
    estimator: Estimator,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    Logistic {
        coefficients: Vec<f64>,
        intercept: f64,
        #[serde(default = "default_classes")]
        classes: [i64; 2],
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
    Forest {
        feature_count: usize,
        trees: Vec<Tree>,
    },
}

fn default_classes() -> [i64; 2] {
    [0, 1]
}

fn default_threshold() -> f64 {
    0.5
}

/// Nodes in pre-order: every child index is greater than its parent's.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
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

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    fn validate(&self, feature_count: usize) -> Result<(), Error> {
        if self.nodes.is_empty() {
            return Err(model_error("tree has no nodes"));
        }

        let len = self.nodes.len();

        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= feature_count {
                        return Err(model_error(format!(
                            "node {} splits on feature {} of {}",
                            index, feature, feature_count
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(model_error(format!("node {} has no threshold", index)));
                    }
                    for child in [left, right] {
                        if child <= index || child >= len {
                            return Err(model_error(format!(
                                "node {} points to invalid child {}",
                                index, child
                            )));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(model_error(format!("leaf {} is not finite", index)));
                    }
                }
            }
        }

        Ok(())
    }

    fn evaluate(&self, features: &[f64]) -> Result<f64, Error> {
        let mut index = 0;

        // children always sit after their parent, so a path visits each node at most once
        for _ in 0..self.nodes.len() {
            match self.nodes.get(index) {
                Some(Node::Leaf { value }) => return Ok(*value),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = features
                        .get(*feature)
                        .ok_or_else(|| model_error("split feature out of range"))?;
                    index = if *x <= *threshold { *left } else { *right };
                }
                None => break,
            }
        }

        Err(model_error("tree path did not reach a leaf"))
    }
}

fn dot(coefficients: &[f64], features: &[f64]) -> f64 {
    coefficients
        .iter()
        .zip(features)
        .map(|(w, x)| w * x)
        .sum()
}

/// Non-finite features or an overflowing sum have no JSON representation.
fn finite(value: f64) -> Result<f64, Error> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(model_error("prediction is not finite"))
    }
}

fn validate_weights(coefficients: &[f64], intercept: f64) -> Result<(), Error> {
    if coefficients.is_empty() {
        return Err(model_error("no coefficients"));
    }
    if !intercept.is_finite() || coefficients.iter().any(|w| !w.is_finite()) {
        return Err(model_error("coefficients must be finite"));
    }

    Ok(())
}

impl ModelArtifact {
    pub fn new(name: &str, estimator: Estimator) -> Result<Self, Error> {
        let artifact = Self {
            name: name.into(),
            estimator,
        };
        artifact.validate()?;

        Ok(artifact)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        artifact.validate()?;

        Ok(artifact)
    }

    fn validate(&self) -> Result<(), Error> {
        match &self.estimator {
            Estimator::Linear {
                coefficients,
                intercept,
            } => validate_weights(coefficients, *intercept),
            Estimator::Logistic {
                coefficients,
                intercept,
                threshold,
                ..
            } => {
                validate_weights(coefficients, *intercept)?;
                if !(0.0..=1.0).contains(threshold) {
                    return Err(model_error("threshold must be within [0, 1]"));
                }
                Ok(())
            }
            Estimator::Forest {
                feature_count,
                trees,
            } => {
                if *feature_count == 0 {
                    return Err(model_error("forest declares no features"));
                }
                if trees.is_empty() {
                    return Err(model_error("forest has no trees"));
                }
                trees
                    .iter()
                    .try_for_each(|tree| tree.validate(*feature_count))
            }
        }
    }
}

impl Model for ModelArtifact {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        match self.estimator {
            Estimator::Linear { .. } => "linear",
            Estimator::Logistic { .. } => "logistic",
            Estimator::Forest { .. } => "forest",
        }
    }

    fn feature_count(&self) -> usize {
        match &self.estimator {
            Estimator::Linear { coefficients, .. } | Estimator::Logistic { coefficients, .. } => {
                coefficients.len()
            }
            Estimator::Forest { feature_count, .. } => *feature_count,
        }
    }

    fn predict(&self, features: &[f64]) -> Result<Prediction, Error> {
        if features.len() != self.feature_count() {
            return Err(feature_count_error(self.feature_count(), features.len()));
        }

        match &self.estimator {
            Estimator::Linear {
                coefficients,
                intercept,
            } => finite(dot(coefficients, features) + intercept).map(Prediction::Value),
            Estimator::Logistic {
                coefficients,
                intercept,
                classes,
                threshold,
            } => {
                let z = finite(dot(coefficients, features) + intercept)?;
                let probability = 1.0 / (1.0 + (-z).exp());
                let class = if probability >= *threshold {
                    classes[1]
                } else {
                    classes[0]
                };
                Ok(Prediction::Class(class))
            }
            Estimator::Forest { trees, .. } => {
                let mut total = 0.0;
                for tree in trees {
                    total += tree.evaluate(features)?;
                }
                finite(total / trees.len() as f64).map(Prediction::Value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artifact(value: serde_json::Value) -> Result<ModelArtifact, Error> {
        ModelArtifact::from_slice(value.to_string().as_bytes())
    }

    fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> Tree {
        Tree::new(vec![
            Node::Split {
                feature,
                threshold,
                left: 1,
                right: 2,
            },
            Node::Leaf { value: low },
            Node::Leaf { value: high },
        ])
    }

    #[test]
    fn linear_is_dot_product_plus_intercept() {
        let model = artifact(json!({
            "name": "fare",
            "kind": "linear",
            "coefficients": [1.0, -2.0, 0.5],
            "intercept": 3.0
        }))
        .unwrap();

        assert_eq!(model.kind(), "linear");
        assert_eq!(
            model.predict(&[2.0, 1.0, 4.0]).unwrap(),
            Prediction::Value(5.0)
        );
    }

    #[test]
    fn logistic_emits_class_codes() {
        let model = artifact(json!({
            "name": "accept",
            "kind": "logistic",
            "coefficients": [4.0],
            "intercept": 0.0,
            "classes": [7, 9]
        }))
        .unwrap();

        assert_eq!(model.predict(&[1.0]).unwrap(), Prediction::Class(9));
        assert_eq!(model.predict(&[-1.0]).unwrap(), Prediction::Class(7));
    }

    #[test]
    fn forest_averages_tree_outputs() {
        let model = ModelArtifact::new(
            "surge",
            Estimator::Forest {
                feature_count: 2,
                trees: vec![stump(0, 5.0, 1.0, 3.0), stump(1, 0.5, 10.0, 20.0)],
            },
        )
        .unwrap();

        assert_eq!(model.predict(&[4.0, 0.9]).unwrap(), Prediction::Value(10.5));
        assert_eq!(model.predict(&[5.0, 0.5]).unwrap(), Prediction::Value(5.5));
    }

    #[test]
    fn forest_parses_from_json() {
        let model = artifact(json!({
            "name": "surge",
            "kind": "forest",
            "feature_count": 1,
            "trees": [{
                "nodes": [
                    { "type": "split", "feature": 0, "threshold": 0.0, "left": 1, "right": 2 },
                    { "type": "leaf", "value": -1.0 },
                    { "type": "leaf", "value": 1.0 }
                ]
            }]
        }))
        .unwrap();

        assert_eq!(model.feature_count(), 1);
        assert_eq!(model.predict(&[0.1]).unwrap(), Prediction::Value(1.0));
    }

    #[test]
    fn wrong_feature_count_is_client_error() {
        let model = artifact(json!({
            "name": "fare",
            "kind": "linear",
            "coefficients": [1.0, 1.0],
            "intercept": 0.0
        }))
        .unwrap();

        let err = model.predict(&[1.0]).unwrap_err();

        assert_eq!(err.code, 201);
    }

    #[test]
    fn overflowing_linear_output_is_an_error() {
        let model = artifact(json!({
            "name": "fare",
            "kind": "linear",
            "coefficients": [1.0, 1.0],
            "intercept": 0.0
        }))
        .unwrap();

        let err = model.predict(&[1.7e308, 1.7e308]).unwrap_err();

        assert_eq!(err.code, 2);
    }

    #[test]
    fn overflowing_forest_output_is_an_error() {
        let model = ModelArtifact::new(
            "surge",
            Estimator::Forest {
                feature_count: 1,
                trees: vec![stump(0, 0.0, 1.7e308, 0.0), stump(0, 0.0, 1.7e308, 0.0)],
            },
        )
        .unwrap();

        assert!(model.predict(&[1.0]).is_ok());
        assert_eq!(model.predict(&[-1.0]).unwrap_err().code, 2);
    }

    #[test]
    fn nan_logistic_input_is_an_error() {
        let model = artifact(json!({
            "name": "accept",
            "kind": "logistic",
            "coefficients": [1.0],
            "intercept": 0.0
        }))
        .unwrap();

        assert_eq!(model.predict(&[f64::NAN]).unwrap_err().code, 2);
    }

    #[test]
    fn backward_child_is_rejected() {
        let tree = Tree::new(vec![
            Node::Split {
                feature: 0,
                threshold: 0.0,
                left: 0,
                right: 1,
            },
            Node::Leaf { value: 1.0 },
        ]);

        let result = ModelArtifact::new(
            "loop",
            Estimator::Forest {
                feature_count: 1,
                trees: vec![tree],
            },
        );

        assert!(result.is_err());
    }

    #[test]
    fn split_on_unknown_feature_is_rejected() {
        let result = ModelArtifact::new(
            "wide",
            Estimator::Forest {
                feature_count: 1,
                trees: vec![stump(3, 0.0, 0.0, 1.0)],
            },
        );

        assert!(result.is_err());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = artifact(json!({ "name": "svm", "kind": "svm" }));

        assert!(result.is_err());
    }
}
