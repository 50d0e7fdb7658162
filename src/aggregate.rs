// imports
use crate::error::Result;
use crate::topology::Group;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};


pub struct Aggregate {}

impl Aggregate {

    pub fn file_name(index: usize) -> String {
        format!("clique_{}", index)
    }

    pub fn output_path(aggregated_dir: &Path, index: usize) -> PathBuf {
        aggregated_dir.join(Aggregate::file_name(index))
    }

    /// Concatenates the tweet files of the clique members into `clique_<index>`.
    /// Nothing is written when that file exists already; members without a file are skipped.
    /// Returns whether the file was written.
    pub fn run(clique: &Group, tweets_dir: &Path, aggregated_dir: &Path) -> Result<bool> {

        let out = Aggregate::output_path(aggregated_dir, clique.index);
        if out.exists() {
            log::debug!("{} exists, not aggregating clique_{}", out.display(), clique.index);
            return Ok(false)
        }

        log::info!("aggregating tweets for clique_{}", clique.index);
        let mut writer = BufWriter::new(File::create(&out)?);
        for user in &clique.members {

            let user_file = tweets_dir.join(user);
            if !user_file.is_file() {
                continue
            }

            let mut reader = File::open(user_file)?;
            io::copy(&mut reader, &mut writer)?;
        }
        writer.flush()?;

        Ok(true)
    }
}


#[cfg(test)]
mod tests {

    use super::Aggregate;
    use crate::topology::Group;
    use std::fs;

    fn clique(index: usize, members: &[&str]) -> Group {
        Group { index: index, members: members.iter().map(|m| m.to_string()).collect() }
    }

    #[test]
    fn concatenates_existing_members_in_order() {

        let tweets = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(tweets.path().join("20"), "second user\n").unwrap();
        fs::write(tweets.path().join("10"), "first user\nmore\n").unwrap();

        let written = Aggregate::run(&clique(3, &["10", "99", "20"]), tweets.path(), out.path()).unwrap();

        assert!(written);
        let text = fs::read_to_string(out.path().join("clique_3")).unwrap();
        assert_eq!(text, "first user\nmore\nsecond user\n");
    }

    #[test]
    fn existing_output_is_left_untouched() {

        let tweets = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(tweets.path().join("1"), "fresh text\n").unwrap();
        fs::write(out.path().join("clique_0"), "old text\n").unwrap();
        let before = fs::metadata(out.path().join("clique_0")).unwrap().modified().unwrap();

        let written = Aggregate::run(&clique(0, &["1"]), tweets.path(), out.path()).unwrap();

        assert!(!written);
        assert_eq!(fs::read_to_string(out.path().join("clique_0")).unwrap(), "old text\n");
        assert_eq!(fs::metadata(out.path().join("clique_0")).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn empty_clique_gives_empty_file() {
        let tweets = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        assert!(Aggregate::run(&clique(1, &[]), tweets.path(), out.path()).unwrap());
        assert_eq!(fs::read_to_string(out.path().join("clique_1")).unwrap(), "");
    }
}
