
pub mod aggregate;
pub mod config;
pub mod dictionary;
pub mod divergence;
pub mod error;
pub mod lda;
pub mod logger;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod tokenize;
pub mod topology;
pub mod vectorize;

pub use config::{files_handling, Config, Params};
pub use error::{Error, Result};
pub use pipeline::Pipeline;
pub use vectorize::{DocVectors, Vectorizer};
