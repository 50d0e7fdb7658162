
use clap::Parser;
use std::ffi::OsString;
use std::fmt::Display;
use std::path::PathBuf;

// file names inside the aggregation root and the per-model output folder
pub const GRAPHS_DIR: &str = "distribution_graphs";
pub const DISTANCES_DIR: &str = "community_user_distances";
pub const TOPN_WORDS_FILE: &str = "topn_words.txt";
pub const CLIQUE_VECTORS_FILE: &str = "document_vectors.bin";
pub const COMMUNITY_VECTORS_FILE: &str = "all_community_doc_vecs.bin";


/// Topic distributions of cliques and Jensen-Shannon distances to their communities.
#[derive(Parser, Clone, Debug)]
#[command(name = "clique_topics", version)]
pub struct Args {
    /// clique topology, one collection of user ids per line
    pub clique_topology: PathBuf,
    /// community topology, line i is compared against clique i
    pub community_topology: PathBuf,
    /// directory holding one text file per user id
    pub tweets_dir: PathBuf,
    /// dictionary json (token -> id)
    pub dictionary: PathBuf,
    /// topic model path stem, reads <model>.npy and <model>.json
    pub model: PathBuf,
    /// output folder for this model, created under the aggregation root
    pub user_topics_dir: PathBuf,

    /// aggregation root
    #[arg(long, default_value = "aggregated_tweets")]
    pub root: PathBuf,

    /// number of words listed per topic
    #[arg(long, default_value_t = 20)]
    pub topn: usize,

    /// precomputed community member vectors [default: <user_topics_dir>/all_community_doc_vecs.bin]
    #[arg(long)]
    pub community_vectors: Option<PathBuf>,

    /// do not render topic distribution charts
    #[arg(long)]
    pub no_charts: bool,
}

#[derive(Clone, Debug)]
pub struct Params {
    pub clique_topology: PathBuf,
    pub community_topology: PathBuf,
    pub tweets_dir: PathBuf,
    pub dictionary: PathBuf,
    pub model: PathBuf,
    pub aggregated_dir: PathBuf,
    pub output_dir: PathBuf,
    pub graphs_dir: PathBuf,
    pub distances_dir: PathBuf,
    pub topn_words_file: PathBuf,
    pub clique_vectors_file: PathBuf,
    pub community_vectors_file: PathBuf,
    pub topn: usize,
    pub draw_charts: bool,
}

impl From<Args> for Params {

    fn from(args: Args) -> Self {

        let output_dir = args.root.join(&args.user_topics_dir);
        let community_vectors_file = args.community_vectors
            .unwrap_or_else(|| args.user_topics_dir.join(COMMUNITY_VECTORS_FILE));

        Params {
            clique_topology: args.clique_topology,
            community_topology: args.community_topology,
            tweets_dir: args.tweets_dir,
            dictionary: args.dictionary,
            model: args.model,
            graphs_dir: output_dir.join(GRAPHS_DIR),
            distances_dir: output_dir.join(DISTANCES_DIR),
            topn_words_file: output_dir.join(TOPN_WORDS_FILE),
            clique_vectors_file: output_dir.join(CLIQUE_VECTORS_FILE),
            community_vectors_file: community_vectors_file,
            aggregated_dir: args.root,
            output_dir: output_dir,
            topn: args.topn,
            draw_charts: !args.no_charts,
        }
    }
}

impl Display for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "using parameters:\n\tclique_topology: {}\n\tcommunity_topology: {}\n\ttweets_dir: {}\
            \n\tdictionary: {}\n\tmodel: {}\n\taggregated_dir: {}\n\toutput_dir: {}\
            \n\tcommunity_vectors: {}\n\ttopn: {}\n\tdraw_charts: {}",
        self.clique_topology.display(), self.community_topology.display(), self.tweets_dir.display(),
        self.dictionary.display(), self.model.display(), self.aggregated_dir.display(), self.output_dir.display(),
        self.community_vectors_file.display(), self.topn, self.draw_charts)
    }
}

pub struct Config {
    params: Params
}

impl Config {

    pub fn get_params(&self) -> Params {
        return self.params.clone()
    }

    pub fn new<I, T>(args: I) -> Result<Config, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone {

        let args = Args::try_parse_from(args)?;
        Ok (
            Self {
                params: Params::from(args)
            }
        )
    }
}


pub mod files_handling {

    use crate::error::Result;
    use crate::lda::ModelMeta;
    use crate::vectorize::DocVectors;

    use ndarray::Array2;
    use ndarray_npy::{read_npy, write_npy};
    use flate2::{Compression, read::GzDecoder, write::GzEncoder};
    use std::collections::HashMap;
    use std::fs::{self, File};
    use std::io::{BufReader, BufWriter, Write};
    use std::path::Path;

    pub fn read_input<R: ReadFile>(file_path: &Path) -> Result<<R as ReadFile>::Item> {
        let input = <R as ReadFile>::read_file(file_path)?;
        Ok(input)
    }

    pub fn save_output<S: SaveFile>(file_path: &Path, item: &S) -> Result<()> {

        // create output folder
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        item.save_file(file_path)?;
        return Ok(())
    }

    pub trait ReadFile {
        type Item;
        fn read_file(file_path: &Path) -> Result<Self::Item>;
    }

    pub trait SaveFile {
        fn save_file(&self, file_path: &Path) -> Result<()>;
    }

    // dictionary: token -> id as a json object
    impl ReadFile for HashMap<String, usize> {
        type Item = Self;
        fn read_file(file_path: &Path) -> Result<Self::Item> {
            let f = BufReader::new(File::open(file_path)?);
            let item = serde_json::from_reader(f)?;
            return Ok(item)
        }
    }

    impl SaveFile for HashMap<String, usize> {
        fn save_file(&self, file_path: &Path) -> Result<()> {
            let f = BufWriter::new(File::create(file_path)?);
            serde_json::to_writer(f, self)?;
            return Ok(())
        }
    }

    // topic-word matrix
    impl ReadFile for Array2<f32> {
        type Item = Self;
        fn read_file(file_path: &Path) -> Result<Self::Item> {
            let item = read_npy(file_path)?;
            Ok(item)
        }
    }

    impl SaveFile for Array2<f32> {
        fn save_file(&self, file_path: &Path) -> Result<()> {
            write_npy(file_path, self)?;
            Ok(())
        }
    }

    impl ReadFile for ModelMeta {
        type Item = Self;
        fn read_file(file_path: &Path) -> Result<Self::Item> {
            let f = BufReader::new(File::open(file_path)?);
            let item = serde_json::from_reader(f)?;
            return Ok(item)
        }
    }

    impl SaveFile for ModelMeta {
        fn save_file(&self, file_path: &Path) -> Result<()> {
            let f = BufWriter::new(File::create(file_path)?);
            serde_json::to_writer_pretty(f, self)?;
            return Ok(())
        }
    }

    // vector caches are bincode, gzip compressed
    impl ReadFile for DocVectors {
        type Item = Self;
        fn read_file(file_path: &Path) -> Result<Self::Item> {
            let f = BufReader::new(File::open(file_path)?);
            let reader = GzDecoder::new(f);
            let item = bincode::deserialize_from(reader)?;
            Ok(item)
        }
    }

    impl SaveFile for DocVectors {
        fn save_file(&self, file_path: &Path) -> Result<()> {
            let f = BufWriter::new(File::create(file_path)?);
            let mut writer = GzEncoder::new(f, Compression::default());
            bincode::serialize_into(&mut writer, self)?;
            writer.finish()?.flush()?;
            Ok(())
        }
    }
}
