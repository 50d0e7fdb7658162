use anyhow::Context;
use clap::Parser;
use clique_topics::{logger, Pipeline, Vectorizer};
use rayon::ThreadPoolBuilder;
use std::path::PathBuf;


// builds the community member vector cache read by `clique_topics`, treated as its
// own executable so it can be ran once per model, ahead of the pipeline.
// example: ... communities dnld_tweets/ tweets.dict tweets_100_lda user_topics_100/all_community_doc_vecs.bin

/// Topic vectors for every community member with tweets.
#[derive(Parser, Debug)]
#[command(name = "community_vectors", version)]
struct Args {
    /// community topology, one collection of user ids per line
    community_topology: PathBuf,
    /// directory holding one text file per user id
    tweets_dir: PathBuf,
    /// dictionary json (token -> id)
    dictionary: PathBuf,
    /// topic model path stem, reads <model>.npy and <model>.json
    model: PathBuf,
    /// vector cache to create or extend
    output: PathBuf,

    /// worker threads for inference
    #[arg(long, default_value_t = 4)]
    threads: usize,
}

fn main() -> anyhow::Result<()> {

    let args = Args::parse();
    logger::init_logger()?;

    ThreadPoolBuilder::new().num_threads(args.threads).build_global()?;

    let vectorizer = Vectorizer::load(&args.dictionary, &args.model)
        .context("cannot load dictionary and model")?;

    Pipeline::community_vectors(&args.community_topology, &args.tweets_dir, &vectorizer, &args.output)
        .with_context(|| format!("cannot build {}", args.output.display()))?;

    Ok(())
}
