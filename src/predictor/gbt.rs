use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use polars::{frame::DataFrame, prelude::DataType};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::Predictor;
use crate::error::PipelineError;

/// A single regression tree in flat-array form.
///
/// `left[i] < 0` marks node `i` as a leaf, whose weight is `value[i]`.
/// Interior nodes route a row left when `row[split_feature[i]] < threshold[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub split_feature: Vec<usize>,
    pub threshold: Vec<f64>,
    pub left: Vec<i32>,
    pub right: Vec<i32>,
    pub value: Vec<f64>,
}

impl Tree {
    /// A single-leaf tree that scores every row with `value`.
    pub fn leaf(value: f64) -> Self {
        Self {
            split_feature: vec![0],
            threshold: vec![0.0],
            left: vec![-1],
            right: vec![-1],
            value: vec![value],
        }
    }

    /// A depth-one tree splitting on one feature.
    pub fn stump(feature: usize, threshold: f64, below: f64, above: f64) -> Self {
        Self {
            split_feature: vec![feature, 0, 0],
            threshold: vec![threshold, 0.0, 0.0],
            left: vec![1, -1, -1],
            right: vec![2, -1, -1],
            value: vec![0.0, below, above],
        }
    }

    /// Route one feature row to its leaf value.
    ///
    /// The artifact is untrusted input: node and feature indices are
    /// bounds-checked, and routing that revisits nodes instead of reaching a
    /// leaf is rejected rather than looping.
    fn score(&self, row: &[f64]) -> Result<f64, PipelineError> {
        let nodes = self.left.len();
        let mut node = 0usize;
        // An acyclic tree reaches a leaf within `nodes` hops; one extra hop
        // lets an out-of-bounds child index surface as malformed.
        for _ in 0..=nodes {
            let (Some(&left), Some(&right)) = (self.left.get(node), self.right.get(node)) else {
                return Err(malformed(node));
            };
            if left < 0 {
                return self.value.get(node).copied().ok_or_else(|| malformed(node));
            }

            let feature = self.split_feature.get(node).copied().ok_or_else(|| malformed(node))?;
            let threshold = self.threshold.get(node).copied().ok_or_else(|| malformed(node))?;
            let value = row.get(feature).copied().ok_or_else(|| {
                PipelineError::PredictorFailure(format!(
                    "split feature index {feature} exceeds the {}-column schema",
                    row.len()
                ))
            })?;
            node = if value < threshold { left as usize } else { right as usize };
        }
        Err(PipelineError::PredictorFailure(
            "tree routing never reached a leaf (cyclic node indices)".into(),
        ))
    }
}

fn malformed(node: usize) -> PipelineError {
    PipelineError::PredictorFailure(format!("malformed tree node index {node}"))
}

/// One named output of the ensemble: a hex cell, or a single series target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbtTarget {
    pub name: String,
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

impl GbtTarget {
    fn score(&self, row: &[f64]) -> Result<f64, PipelineError> {
        let mut total = self.base_score;
        for tree in &self.trees {
            total += tree.score(row)?;
        }
        Ok(total)
    }
}

/// Gradient-boosted tree regressor deserialized from a JSON artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbtModel {
    feature_names: Vec<String>,
    targets: Vec<GbtTarget>,

    #[serde(skip)]
    target_names: Vec<String>,
}

impl GbtModel {
    pub fn new(feature_names: Vec<String>, targets: Vec<GbtTarget>) -> Self {
        let target_names = targets.iter().map(|t| t.name.clone()).collect();
        Self { feature_names, targets, target_names }
    }

    /// Loads a serialized model from `path`.
    pub fn from_json(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open model artifact: {}", path.display()))?;
        let model: GbtModel = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Malformed model artifact: {}", path.display()))?;
        info!(
            features = model.feature_names.len(),
            targets = model.targets.len(),
            "loaded model artifact"
        );
        Ok(Self::new(model.feature_names, model.targets))
    }

    /// Writes the model as a JSON artifact at `path`.
    pub fn to_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create model artifact: {}", path.display()))?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }
}

impl Predictor for GbtModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn target_names(&self) -> &[String] {
        &self.target_names
    }

    fn predict(&self, batch: &DataFrame) -> Result<Vec<Vec<f64>>, PipelineError> {
        let rows = to_rows(batch, &self.feature_names)?;
        let mut outputs = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut output = Vec::with_capacity(self.targets.len());
            for target in &self.targets {
                output.push(target.score(row)?);
            }
            outputs.push(output);
        }
        Ok(outputs)
    }
}

/// Extract `features` from `batch` into row-major f64 form, in feature order.
fn to_rows(batch: &DataFrame, features: &[String]) -> Result<Vec<Vec<f64>>, PipelineError> {
    let mut columns = Vec::with_capacity(features.len());
    for name in features {
        let column = batch.column(name).map_err(|_| {
            PipelineError::SchemaMismatch(format!("predictor input is missing column '{name}'"))
        })?;
        let column = column.cast(&DataType::Float64)?;
        columns.push(column.f64()?.clone());
    }

    let mut rows = vec![vec![0.0; features.len()]; batch.height()];
    for (j, ca) in columns.iter().enumerate() {
        for (i, value) in ca.into_iter().enumerate() {
            rows[i][j] = value.ok_or_else(|| {
                PipelineError::PredictorFailure(format!(
                    "null value in feature '{}' at row {i}",
                    features[j]
                ))
            })?;
        }
    }
    Ok(rows)
}
