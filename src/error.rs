use ndarray_npy::{ReadNpyError, WriteNpyError};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("vector cache encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("cannot read topic matrix: {0}")]
    ReadNpy(#[from] ReadNpyError),

    #[error("cannot write topic matrix: {0}")]
    WriteNpy(#[from] WriteNpyError),

    #[error("cannot write distances: {0}")]
    Csv(#[from] csv::Error),

    #[error("{}:{line}: cannot parse id group: {reason}", .path.display())]
    Topology { path: PathBuf, line: usize, reason: String },

    #[error("invalid topic model: {0}")]
    Model(String),

    #[error("vector length mismatch, expected {expected} found {found}")]
    Dimension { expected: usize, found: usize },

    #[error("distribution total must be positive and finite, found {0}")]
    Distribution(f64),

    #[error("no document vector for clique_{0}")]
    MissingCliqueVector(usize),

    #[error("cannot draw {}: {reason}", .path.display())]
    Plot { path: PathBuf, reason: String },
}
