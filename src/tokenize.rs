// imports
use crate::error::Result;

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use stop_words::{get, LANGUAGE};


// defines the behavior needed for turning raw text into document tokens
pub trait Tokenizer {
    fn tokenize(&self, line: &str) -> Vec<String>;
}

pub struct TweetTokenizer {
    stop_words: HashSet<String>,
    min_len: usize,
}

impl Default for TweetTokenizer {
    fn default() -> Self {
        Self::new(get(LANGUAGE::English), 3)
    }
}

impl TweetTokenizer {

    pub fn new(stop_words: Vec<String>, min_len: usize) -> TweetTokenizer {
        Self {
            stop_words: stop_words.into_iter().map(|w| w.to_lowercase()).collect(),
            min_len: min_len
        }
    }

    fn is_noise(word: &str) -> bool {
        word.starts_with("http") || word.starts_with("www.") || word.starts_with('@') || word == "rt"
    }

    fn keep(&self, token: &str) -> bool {
        token.chars().count() >= self.min_len
            && !token.chars().all(|c| c.is_numeric())
            && !self.stop_words.contains(token)
    }

    /// Reads a whole text file and tokenizes it line by line into one document.
    /// Bytes that are not valid UTF-8 are replaced, never rejected.
    pub fn convert_to_doc(&self, file_path: &Path) -> Result<Vec<String>> {

        let mut reader = BufReader::new(File::open(file_path)?);
        let mut buf = Vec::new();
        let mut doc = Vec::new();
        while reader.read_until(b'\n', &mut buf)? > 0 {
            doc.extend(self.tokenize(&String::from_utf8_lossy(&buf)));
            buf.clear();
        }
        Ok(doc)
    }
}

impl Tokenizer for TweetTokenizer {

    // lower case, drop links, mentions and retweet markers, then split what is left
    // on anything that is not alphanumeric (hashtags keep their word)
    fn tokenize(&self, line: &str) -> Vec<String> {
        line.to_lowercase()
            .split_whitespace()
            .filter(|word| !TweetTokenizer::is_noise(word))
            .flat_map(|word| word.split(|c: char| !c.is_alphanumeric()))
            .filter(|token| self.keep(token))
            .map(|token| token.to_string())
            .collect()
    }
}
