use crate::config::files_handling::read_input;
use crate::error::{Error, Result};

use ndarray::prelude::*;
use ndarray_rand::RandomExt;
use rand::{rngs::StdRng, SeedableRng};
use ndarray_rand::rand_distr::Gamma;
use serde::{Serialize, Deserialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};


/// Dirichlet prior over topics, one value for all topics or one per topic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prior {
    Symmetric(f32),
    Asymmetric(Vec<f32>),
}

/// Inference settings stored next to the topic matrix as `<model>.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    #[serde(default)]
    pub alpha: Option<Prior>,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_gamma_threshold")]
    pub gamma_threshold: f32,
    #[serde(default)]
    pub random_state: u64,
}

fn default_iterations() -> usize { 50 }
fn default_gamma_threshold() -> f32 { 0.001 }

impl Default for ModelMeta {
    fn default() -> Self {
        Self {
            alpha: None,
            iterations: default_iterations(),
            gamma_threshold: default_gamma_threshold(),
            random_state: 0
        }
    }
}

/// A trained LDA model, read-only. Rows of `lambda` are topics, columns are dictionary ids.
pub struct LdaModel {
    topics: Array2<f32>,
    exp_elog_beta: Array2<f32>,
    alpha: Array1<f32>,
    gamma_init: Gamma<f32>,
    iterations: usize,
    gamma_threshold: f32,
    random_state: u64,
}

impl LdaModel {

    pub fn new(lambda: Array2<f32>, meta: ModelMeta) -> Result<LdaModel> {

        let (num_topics, vocab_size) = lambda.dim();
        if num_topics == 0 || vocab_size == 0 {
            return Err(Error::Model(format!("empty topic matrix of shape ({}, {})", num_topics, vocab_size)));
        }
        if lambda.iter().any(|x| !x.is_finite() || *x <= 0.0) {
            return Err(Error::Model("topic matrix entries must be finite and positive".to_string()));
        }

        let alpha = match meta.alpha {
            None => Array1::from_elem(num_topics, 1.0 / num_topics as f32),
            Some(Prior::Symmetric(a)) => Array1::from_elem(num_topics, a),
            Some(Prior::Asymmetric(a)) if a.len() == num_topics => Array1::from_vec(a),
            Some(Prior::Asymmetric(a)) => {
                return Err(Error::Model(format!("alpha has {} values for {} topics", a.len(), num_topics)))
            }
        };
        if alpha.iter().any(|a| !a.is_finite() || *a <= 0.0) {
            return Err(Error::Model("alpha must be finite and positive".to_string()));
        }

        // E[log beta] under the variational posterior, computed once
        let exp_elog_beta = dirichlet_expectation_2d(&lambda).mapv(f32::exp);

        // normalized topic-word distributions
        let sums = lambda.sum_axis(Axis(1)).insert_axis(Axis(1));
        let topics = &lambda / &sums;

        let gamma_init = Gamma::new(100.0, 1.0 / 100.0).map_err(|e| Error::Model(e.to_string()))?;

        Ok(Self {
            topics: topics,
            exp_elog_beta: exp_elog_beta,
            alpha: alpha,
            gamma_init: gamma_init,
            iterations: meta.iterations,
            gamma_threshold: meta.gamma_threshold,
            random_state: meta.random_state
        })
    }

    /// Loads `<stem>.npy` and, when present, `<stem>.json`.
    pub fn load(model_path: &Path) -> Result<LdaModel> {

        let lambda = read_input::<Array2<f32>>(&with_suffix(model_path, ".npy"))?;

        let meta_path = with_suffix(model_path, ".json");
        let meta = if meta_path.exists() {
            read_input::<ModelMeta>(&meta_path)?
        } else {
            log::warn!("no model metadata at {}, using default inference settings", meta_path.display());
            ModelMeta::default()
        };

        LdaModel::new(lambda, meta)
    }

    pub fn num_topics(&self) -> usize {
        self.topics.dim().0
    }

    pub fn vocab_size(&self) -> usize {
        self.topics.dim().1
    }

    /// The `topn` most probable word ids of a topic, most probable first.
    pub fn show_topic(&self, topic: usize, topn: usize) -> Vec<(usize, f32)> {

        let mut indexed: Vec<(usize, f32)> = self.topics.row(topic).iter().copied().enumerate().collect();

        // sort by probability in descending order
        indexed.sort_by(|(_i, s), (_j, t)| t.total_cmp(s));
        indexed.truncate(topn);
        indexed
    }

    /// Variational E-step for one bag of words, returns the unnormalized gamma.
    /// The starting point is drawn from a generator seeded with `random_state`,
    /// so the same document always yields the same gamma.
    pub fn inference(&self, bow: &[(usize, u32)]) -> Array1<f32> {

        if bow.is_empty() {
            return self.alpha.clone();
        }

        let k = self.num_topics();
        let mut rng = StdRng::seed_from_u64(self.random_state);
        let mut gamma: Array1<f32> = Array1::random_using(k, &self.gamma_init, &mut rng);

        let ids: Vec<usize> = bow.iter().map(|(id, _)| *id).collect();
        let cts: Array1<f32> = bow.iter().map(|(_, ct)| *ct as f32).collect();

        // (k, n) slice of exp(E[log beta]) for the words in this document
        let beta_d: Array2<f32> = self.exp_elog_beta.select(Axis(1), &ids);

        let mut exp_elog_theta = dirichlet_expectation(gamma.view()).mapv(f32::exp);
        let mut phinorm = exp_elog_theta.dot(&beta_d) + f32::EPSILON;

        for _ in 0..self.iterations {

            let last_gamma = gamma.clone();
            gamma = &self.alpha + &(&exp_elog_theta * &beta_d.dot(&(&cts / &phinorm)));
            exp_elog_theta = dirichlet_expectation(gamma.view()).mapv(f32::exp);
            phinorm = exp_elog_theta.dot(&beta_d) + f32::EPSILON;

            let mean_change = (&gamma - &last_gamma).mapv(f32::abs).mean().unwrap_or(0.0);
            if mean_change < self.gamma_threshold {
                break;
            }
        }

        gamma
    }

    /// Topic distribution of a bag of words as (topic, probability) pairs.
    pub fn doc_topics(&self, bow: &[(usize, u32)]) -> Vec<(usize, f32)> {
        let gamma = self.inference(bow);
        let total = gamma.sum();
        gamma.iter().map(|g| g / total).enumerate().collect()
    }
}

/// Densifies (topic, probability) pairs into a vector of `length` entries.
pub fn sparse_to_full(doc: &[(usize, f32)], length: usize) -> Array1<f32> {
    let mut dense = Array1::zeros(length);
    for (topic, value) in doc {
        if *topic < length {
            dense[*topic] = *value;
        }
    }
    dense
}

// `model.npy` style suffixes, keeping any dots already in the stem
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn dirichlet_expectation(alpha: ArrayView1<f32>) -> Array1<f32> {
    let total = digamma(alpha.sum() as f64);
    alpha.mapv(|a| (digamma(a as f64) - total) as f32)
}

fn dirichlet_expectation_2d(alpha: &Array2<f32>) -> Array2<f32> {
    let mut expectation = Array2::zeros(alpha.dim());
    for (row, mut out) in alpha.axis_iter(Axis(0)).zip(expectation.axis_iter_mut(Axis(0))) {
        out.assign(&dirichlet_expectation(row));
    }
    expectation
}

// recurrence up to x >= 6, then the asymptotic series
fn digamma(mut x: f64) -> f64 {
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let f = 1.0 / (x * x);
    result + x.ln() - 0.5 / x
        - f * (1.0 / 12.0 - f * (1.0 / 120.0 - f * (1.0 / 252.0 - f * (1.0 / 240.0 - f / 132.0))))
}
