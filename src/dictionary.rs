use crate::config::files_handling::read_input;
use crate::error::{Error, Result};

use std::collections::{BTreeMap, HashMap};
use std::path::Path;


/// Token <-> id mapping the topic model was trained with.
#[derive(Clone, Debug)]
pub struct Dictionary {
    t2i: HashMap<String, usize>,
    i2t: HashMap<usize, String>,
}

impl Dictionary {

    pub fn new(t2i: HashMap<String, usize>) -> Result<Dictionary> {

        let mut i2t: HashMap<usize, String> = HashMap::new();
        for (t, i) in &t2i {
            if let Some(other) = i2t.insert(*i, t.to_owned()) {
                return Err(Error::Model(format!("tokens '{}' and '{}' share id {}", other, t, i)));
            }
        }

        Ok(Self {
            t2i: t2i,
            i2t: i2t
        })
    }

    pub fn load(file_path: &Path) -> Result<Dictionary> {
        let t2i = read_input::<HashMap<String, usize>>(file_path)?;
        Dictionary::new(t2i)
    }

    pub fn len(&self) -> usize {
        self.t2i.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t2i.is_empty()
    }

    /// Largest id + 1, the vocabulary size a model needs to cover this dictionary.
    pub fn id_bound(&self) -> usize {
        self.i2t.keys().max().map_or(0, |i| i + 1)
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.i2t.get(&id).map(|t| t.as_str())
    }

    /// Bag of words over known tokens as (id, count) pairs sorted by id; unknown tokens are dropped.
    pub fn doc2bow<S: AsRef<str>>(&self, doc: &[S]) -> Vec<(usize, u32)> {

        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for tok in doc {
            if let Some(id) = self.t2i.get(tok.as_ref()) {
                *counts.entry(*id).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }
}
