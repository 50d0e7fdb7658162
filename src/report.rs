// imports
use crate::divergence::jensen_shannon;
use crate::error::Result;
use crate::topology::Group;
use crate::vectorize::{DocVectors, Vectorizer};

use ndarray::Array1;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};


pub struct Report {}

impl Report {

    pub fn distances_path(distances_dir: &Path, index: usize) -> PathBuf {
        distances_dir.join(format!("jensen_shannon_community_{}", index))
    }

    /// Lists the `topn` most probable words of every topic. Skipped when `file_path` exists.
    pub fn write_topn_words(vectorizer: &Vectorizer, topn: usize, file_path: &Path) -> Result<bool> {

        if file_path.exists() {
            log::debug!("{} exists, not writing top words", file_path.display());
            return Ok(false)
        }

        log::info!("writing top {} words per topic to {}", topn, file_path.display());
        let model = vectorizer.model();
        let dictionary = vectorizer.dictionary();

        let mut f = BufWriter::new(File::create(file_path)?);
        for topic in 0..model.num_topics() {

            writeln!(f, "Topic #{}: ", topic + 1)?;
            for (id, _prob) in model.show_topic(topic, topn) {
                match dictionary.token(id) {
                    Some(word) => writeln!(f, "\t{}", strip_pos_tag(word))?,
                    None => log::debug!("topic {} word id {} is not in the dictionary", topic + 1, id)
                }
            }
            writeln!(f)?;
        }
        f.flush()?;

        Ok(true)
    }

    /// Writes `<user>\tclique\t<divergence>` for every community member with a cached vector or a
    /// tweet file. Skipped when `file_path` exists.
    pub fn write_distances(community: &Group,
        clique_vec: &Array1<f32>,
        vectorizer: &Vectorizer,
        cached: &DocVectors,
        tweets_dir: &Path,
        file_path: &Path) -> Result<bool> {

        if file_path.exists() {
            log::debug!("{} exists, not writing distances", file_path.display());
            return Ok(false)
        }

        let mut wrt = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(file_path)?;

        for user in &community.members {

            // cached vectors first, otherwise compute from the tweets if there are any
            let jsd = match cached.get(user) {
                Some(user_vec) => jensen_shannon(clique_vec.view(), user_vec.view())?,
                None => {
                    let user_file = tweets_dir.join(user);
                    if !user_file.is_file() {
                        continue
                    }
                    let user_vec = vectorizer.doc_to_vec(&user_file)?;
                    jensen_shannon(clique_vec.view(), user_vec.view())?
                }
            };

            log::info!("writing Jensen Shannon distance for user {} in community {}", user, community.index);
            wrt.serialize((user.as_str(), "clique", jsd))?;
        }
        wrt.flush()?;

        Ok(true)
    }
}

// drops a trailing part-of-speech tag, `walk/VB` -> `walk`
fn strip_pos_tag(word: &str) -> &str {
    match word.rfind('/') {
        Some(i) if i > 0 && i + 1 < word.len() && !word[..i].ends_with('/') => &word[..i],
        _ => word
    }
}
