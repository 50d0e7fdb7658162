// imports
use crate::config::files_handling::{read_input, save_output};
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::lda::{sparse_to_full, LdaModel};
use crate::tokenize::TweetTokenizer;

use ndarray::Array1;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use std::path::Path;


/// Persisted topic vectors keyed by file name (cliques) or user id (community members).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocVectors {
    vecs: BTreeMap<String, Array1<f32>>,
}

impl DocVectors {

    pub fn new() -> DocVectors {
        Self::default()
    }

    /// Reads a cache file, an absent file is an empty cache.
    pub fn load_or_default(file_path: &Path) -> Result<DocVectors> {
        if !file_path.exists() {
            log::debug!("no vector cache at {}", file_path.display());
            return Ok(DocVectors::new());
        }
        let vecs = read_input::<DocVectors>(file_path)?;
        log::info!("loaded {} cached vectors from {}", vecs.len(), file_path.display());
        Ok(vecs)
    }

    pub fn save(&self, file_path: &Path) -> Result<()> {
        save_output(file_path, self)
    }

    pub fn get(&self, key: &str) -> Option<&Array1<f32>> {
        self.vecs.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vecs.contains_key(key)
    }

    pub fn insert(&mut self, key: String, vec: Array1<f32>) -> Option<Array1<f32>> {
        self.vecs.insert(key, vec)
    }

    pub fn len(&self) -> usize {
        self.vecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vecs.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.vecs.keys()
    }
}


/// Turns text files into dense topic distributions with a fixed dictionary and model.
pub struct Vectorizer {
    dictionary: Dictionary,
    model: LdaModel,
    tokenizer: TweetTokenizer,
}

impl Vectorizer {

    pub fn new(dictionary: Dictionary, model: LdaModel, tokenizer: TweetTokenizer) -> Result<Vectorizer> {

        // every dictionary id has to index a column of the topic matrix
        if dictionary.id_bound() > model.vocab_size() {
            return Err(Error::Dimension { expected: model.vocab_size(), found: dictionary.id_bound() });
        }

        Ok(Self {
            dictionary: dictionary,
            model: model,
            tokenizer: tokenizer
        })
    }

    pub fn load(dictionary_path: &Path, model_path: &Path) -> Result<Vectorizer> {

        let dictionary = Dictionary::load(dictionary_path)?;
        log::info!("loaded dictionary of {} tokens from {}", dictionary.len(), dictionary_path.display());

        let model = LdaModel::load(model_path)?;
        log::info!("loaded topic model with {} topics over {} words", model.num_topics(), model.vocab_size());

        Vectorizer::new(dictionary, model, TweetTokenizer::default())
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn model(&self) -> &LdaModel {
        &self.model
    }

    pub fn num_topics(&self) -> usize {
        self.model.num_topics()
    }

    /// Text -> tokens -> bag of words -> topic distribution, densified to `num_topics` entries.
    pub fn doc_to_vec(&self, file_path: &Path) -> Result<Array1<f32>> {

        let doc = self.tokenizer.convert_to_doc(file_path)?;
        let bow = self.dictionary.doc2bow(&doc);
        let doc_topics = self.model.doc_topics(&bow);
        Ok(sparse_to_full(&doc_topics, self.model.num_topics()))
    }

    /// Vectorizes the text file of every user not already in `cache`, in parallel.
    /// Users without a file are skipped. Returns how many vectors were added.
    pub fn vectorize_users(&self, users: &[String], tweets_dir: &Path, cache: &mut DocVectors) -> Result<usize> {

        let todo: Vec<&String> = users.iter()
            .filter(|user| !cache.contains_key(user))
            .filter(|user| tweets_dir.join(user).is_file())
            .collect();

        let computed: Vec<(String, Array1<f32>)> = todo.par_iter().map(|user| {
            log::info!("getting document vector for user {}", user);
            let vec = self.doc_to_vec(&tweets_dir.join(user))?;
            Ok((user.to_string(), vec))
        }).collect::<Result<Vec<(String, Array1<f32>)>>>()?;

        let added = computed.len();
        for (user, vec) in computed {
            cache.insert(user, vec);
        }
        Ok(added)
    }
}
