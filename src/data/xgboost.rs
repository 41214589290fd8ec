//! Gradient-boosted tree ensemble read from an XGBoost JSON model export.
//!
//! Only the `gbtree` booster with numerical splits is supported; models with
//! categorical splits are rejected at load time. A node sends
//! `x < threshold` left, NaN follows the node's default direction, and a leaf's
//! value lives in `split_conditions`.

use std::{fs, path::Path};

use anyhow::{bail, ensure, Context, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::Deserialize;
use tracing::info;

use crate::interaction::Classifier;

#[derive(Debug, Deserialize)]
struct ModelFile {
    learner: Learner,
}

#[derive(Debug, Deserialize)]
struct Learner {
    gradient_booster: GradientBooster,
    learner_model_param: LearnerModelParam,
    objective: ObjectiveParam,
}

#[derive(Debug, Deserialize)]
struct GradientBooster {
    name: String,
    model: Option<GbTreeModel>,
}

#[derive(Debug, Deserialize)]
struct GbTreeModel {
    trees: Vec<TreeDump>,
    tree_info: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct TreeDump {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<usize>,
    split_conditions: Vec<f32>,
    default_left: Vec<Flag>,
    #[serde(default)]
    split_type: Vec<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(u8),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LearnerModelParam {
    base_score: String,
    num_class: String,
    num_feature: String,
}

#[derive(Debug, Deserialize)]
struct ObjectiveParam {
    name: String,
}

/// Output transform applied to summed tree margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    Softmax,
    Logistic,
}

#[derive(Debug, Clone)]
struct Node {
    left: i32,
    right: i32,
    feature: usize,
    value: f32,
    default_left: bool,
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_dump(dump: TreeDump, num_feature: usize) -> Result<Self> {
        let len = dump.left_children.len();
        ensure!(len > 0, "tree has no nodes");
        ensure!(
            [
                dump.right_children.len(),
                dump.split_indices.len(),
                dump.split_conditions.len(),
                dump.default_left.len(),
            ]
            .iter()
            .all(|&n| n == len),
            "tree arrays have inconsistent lengths"
        );

        if let Some(idx) = dump.split_type.iter().position(|&kind| kind != 0) {
            bail!("node {idx} uses a categorical split, which is not supported");
        }

        let mut nodes = Vec::with_capacity(len);
        for idx in 0..len {
            let (left, right) = (dump.left_children[idx], dump.right_children[idx]);
            let node = Node {
                left,
                right,
                feature: dump.split_indices[idx],
                value: dump.split_conditions[idx],
                default_left: dump.default_left[idx].is_set(),
            };
            if left >= 0 {
                // children always come after their parent, so traversal terminates
                for child in [left, right] {
                    ensure!(
                        child as usize > idx && (child as usize) < len,
                        "node {idx} has invalid child {child}"
                    );
                }
                ensure!(
                    node.feature < num_feature,
                    "node {idx} splits on feature {} but model has {num_feature}",
                    node.feature
                );
            }
            nodes.push(node);
        }
        Ok(Self { nodes })
    }

    fn leaf_value(&self, row: ArrayView1<'_, f32>) -> f32 {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            if node.left < 0 {
                return node.value;
            }
            let x = row[node.feature];
            let go_left = if x.is_nan() {
                node.default_left
            } else {
                x < node.value
            };
            let next = if go_left { node.left } else { node.right };
            idx = next as usize;
        }
    }
}

/// Pretrained boosted-tree classifier.
#[derive(Debug, Clone)]
pub struct GradientBoostedTrees {
    trees: Vec<Tree>,
    tree_groups: Vec<usize>,
    num_groups: usize,
    num_features: usize,
    base_margins: Vec<f32>,
    objective: Objective,
}

impl GradientBoostedTrees {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let model = Self::from_json(&raw)
            .with_context(|| format!("parsing classifier from {}", path.display()))?;
        info!(
            path = %path.display(),
            trees = model.trees.len(),
            classes = model.num_classes(),
            features = model.num_features,
            "loaded gradient boosted trees"
        );
        Ok(model)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: ModelFile = serde_json::from_str(raw)?;
        let learner = file.learner;

        if learner.gradient_booster.name != "gbtree" {
            bail!("unsupported booster {}", learner.gradient_booster.name);
        }
        let Some(model) = learner.gradient_booster.model else {
            bail!("gbtree booster carries no model");
        };

        let objective = match learner.objective.name.as_str() {
            "multi:softprob" | "multi:softmax" => Objective::Softmax,
            "binary:logistic" => Objective::Logistic,
            other => bail!("unsupported objective {other}"),
        };
        let params = &learner.learner_model_param;
        let num_class: usize = params.num_class.trim().parse().context("num_class")?;
        let num_features: usize = params.num_feature.trim().parse().context("num_feature")?;
        let base_scores = parse_base_score(&params.base_score)?;

        let num_groups = match objective {
            Objective::Softmax => {
                ensure!(num_class >= 2, "softmax objective needs num_class >= 2");
                num_class
            }
            Objective::Logistic => 1,
        };
        let base_scores = match base_scores.len() {
            1 => vec![base_scores[0]; num_groups],
            n if n == num_groups => base_scores,
            n => bail!("base_score has {n} values but model has {num_groups} groups"),
        };
        let base_margins = match objective {
            Objective::Softmax => base_scores,
            Objective::Logistic => {
                let p = base_scores[0];
                ensure!(p > 0.0 && p < 1.0, "logistic base_score must lie in (0, 1)");
                vec![(p / (1.0 - p)).ln()]
            }
        };

        ensure!(
            model.trees.len() == model.tree_info.len(),
            "{} trees but {} tree_info entries",
            model.trees.len(),
            model.tree_info.len()
        );
        if let Some(group) = model.tree_info.iter().find(|&&g| g >= num_groups) {
            bail!("tree assigned to class {group} but model has {num_groups} groups");
        }
        let trees = model
            .trees
            .into_iter()
            .enumerate()
            .map(|(idx, dump)| Tree::from_dump(dump, num_features).with_context(|| format!("tree {idx}")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            trees,
            tree_groups: model.tree_info,
            num_groups,
            num_features,
            base_margins,
            objective,
        })
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    fn margins(&self, row: ArrayView1<'_, f32>) -> Vec<f32> {
        let mut margins = self.base_margins.clone();
        for (tree, &group) in self.trees.iter().zip(&self.tree_groups) {
            margins[group] += tree.leaf_value(row);
        }
        margins
    }

    fn transform(&self, margins: Vec<f32>) -> Vec<f32> {
        match self.objective {
            Objective::Softmax => softmax(margins),
            Objective::Logistic => {
                let p = 1.0 / (1.0 + (-margins[0]).exp());
                vec![1.0 - p, p]
            }
        }
    }
}

impl Classifier for GradientBoostedTrees {
    fn num_classes(&self) -> usize {
        match self.objective {
            Objective::Softmax => self.num_groups,
            Objective::Logistic => 2,
        }
    }

    fn num_features(&self) -> Option<usize> {
        Some(self.num_features)
    }

    fn predict_scores(&self, batch: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
        ensure!(
            batch.ncols() == self.num_features,
            "expected {} features per row, got {}",
            self.num_features,
            batch.ncols()
        );
        let classes = self.num_classes();
        let mut scores = Vec::with_capacity(batch.nrows() * classes);
        for row in batch.rows() {
            scores.extend(self.transform(self.margins(row)));
        }
        Ok(Array2::from_shape_vec((batch.nrows(), classes), scores)?)
    }
}

/// Accepts a scalar `"5E-1"` or a bracketed per-class list `"[5E-1,2E-1]"`.
fn parse_base_score(raw: &str) -> Result<Vec<f32>> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']');
    inner
        .split(',')
        .map(|value| {
            value
                .trim()
                .parse::<f32>()
                .with_context(|| format!("invalid base_score {raw:?}"))
        })
        .collect()
}

fn softmax(margins: Vec<f32>) -> Vec<f32> {
    let max = margins.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = margins.iter().map(|m| (m - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
