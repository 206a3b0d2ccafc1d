//! TF-IDF + multinomial naive Bayes text model loaded from a JSON artifact.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::ClassifierError;
use crate::tokenize::tokenize;
use crate::Classifier;

/// On-disk layout of a trained model.
///
/// `feature_log_prob` is `classes.len()` rows of `vocabulary.len()` columns.
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    vocabulary: HashMap<String, usize>,
    #[serde(default)]
    idf: Option<Vec<f64>>,
    #[serde(default)]
    stop_words: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct NaiveBayesModel {
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    stop_words: HashSet<String>,
}

impl NaiveBayesModel {
    /// Read and validate a model artifact from `path`.
    ///
    /// # Errors
    ///
    /// - [`ClassifierError::Io`] if the file cannot be read.
    /// - [`ClassifierError::Parse`] if it is not a valid artifact document.
    /// - [`ClassifierError::InvalidModel`] if the matrix shapes disagree.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate a model artifact held in memory.
    ///
    /// # Errors
    ///
    /// See [`NaiveBayesModel::load`].
    pub fn from_json(raw: &str) -> Result<Self, ClassifierError> {
        let artifact: ModelArtifact = serde_json::from_str(raw)?;
        Self::try_from(artifact)
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// L2-normalised TF-IDF vector for `text`, sparse as `(column, weight)`.
    fn features(&self, text: &str) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(text, &self.stop_words) {
            if let Some(&column) = self.vocabulary.get(&token) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut weighted: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, tf)| {
                let idf = self.idf.as_ref().map_or(1.0, |idf| idf[column]);
                (column, tf * idf)
            })
            .collect();

        let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut weighted {
                *w /= norm;
            }
        }
        weighted
    }

    /// Joint log-likelihood per class.
    fn scores(&self, text: &str) -> Vec<f64> {
        let features = self.features(text);
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + features
                        .iter()
                        .map(|&(column, weight)| weight * log_probs[column])
                        .sum::<f64>()
            })
            .collect()
    }
}

impl TryFrom<ModelArtifact> for NaiveBayesModel {
    type Error = ClassifierError;

    fn try_from(artifact: ModelArtifact) -> Result<Self, Self::Error> {
        let n_classes = artifact.classes.len();
        let n_features = artifact.vocabulary.len();

        if n_classes == 0 {
            return Err(ClassifierError::InvalidModel("model has no classes".into()));
        }
        if artifact.class_log_prior.len() != n_classes {
            return Err(ClassifierError::InvalidModel(format!(
                "class_log_prior has {} entries, expected {n_classes}",
                artifact.class_log_prior.len()
            )));
        }
        if artifact.feature_log_prob.len() != n_classes {
            return Err(ClassifierError::InvalidModel(format!(
                "feature_log_prob has {} rows, expected {n_classes}",
                artifact.feature_log_prob.len()
            )));
        }
        if let Some(row) = artifact
            .feature_log_prob
            .iter()
            .position(|row| row.len() != n_features)
        {
            return Err(ClassifierError::InvalidModel(format!(
                "feature_log_prob row {row} has {} columns, expected {n_features}",
                artifact.feature_log_prob[row].len()
            )));
        }
        if let Some((term, column)) = artifact
            .vocabulary
            .iter()
            .find(|(_, &column)| column >= n_features)
        {
            return Err(ClassifierError::InvalidModel(format!(
                "vocabulary term {term:?} maps to column {column}, out of range"
            )));
        }
        if let Some(idf) = &artifact.idf {
            if idf.len() != n_features {
                return Err(ClassifierError::InvalidModel(format!(
                    "idf has {} entries, expected {n_features}",
                    idf.len()
                )));
            }
        }

        Ok(Self {
            classes: artifact.classes,
            class_log_prior: artifact.class_log_prior,
            feature_log_prob: artifact.feature_log_prob,
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            stop_words: artifact
                .stop_words
                .unwrap_or_default()
                .into_iter()
                .map(|w| w.to_lowercase())
                .collect(),
        })
    }
}

impl Classifier for NaiveBayesModel {
    fn predict_label(&self, text: &str) -> String {
        let scores = self.scores(text);
        // Ties keep the earliest class.
        let best = scores
            .iter()
            .enumerate()
            .fold(0, |best, (i, score)| if *score > scores[best] { i } else { best });
        self.classes[best].clone()
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
