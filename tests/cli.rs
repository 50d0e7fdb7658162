use assert_cmd::Command;
use clique_topics::files_handling::save_output;
use clique_topics::lda::ModelMeta;
use clique_topics::DocVectors;
use ndarray::{array, Array2};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// a toy world: sports users 1 and 2, programming users 3 and 5, user 4 never tweeted
fn write_fixture(dir: &Path) {

    fs::write(dir.join("cliques"), "[1, 2]\nset([3L, 5L])\n").unwrap();
    fs::write(dir.join("communities"), "[1, 2, 3, 4]\n[3, 5]\n").unwrap();

    let tweets = dir.join("dnld_tweets");
    fs::create_dir_all(&tweets).unwrap();
    fs::write(tweets.join("1"), "What a match! #football\nthe goal was great\n").unwrap();
    fs::write(tweets.join("2"), "football football goal\n").unwrap();
    fs::write(tweets.join("3"), "RT @dev: the rust compiler rejects my borrow\n").unwrap();
    fs::write(tweets.join("5"), "compiler errors all day http://t.co/abc\n").unwrap();

    let t2i: HashMap<String, usize> = ["football/NN", "football", "goal", "match", "rust", "compiler", "borrow"]
        .iter()
        .enumerate()
        .map(|(i, t)| (t.to_string(), i))
        .collect();
    save_output(&dir.join("tweets.dict"), &t2i).unwrap();

    let lambda: Array2<f32> = array![
        [9.5, 9.0, 8.0, 7.0, 0.1, 0.1, 0.1],
        [0.1, 0.1, 0.1, 0.1, 9.0, 8.0, 7.0]
    ];
    save_output(&dir.join("tweets_2_lda.npy"), &lambda).unwrap();
    save_output(&dir.join("tweets_2_lda.json"), &ModelMeta::default()).unwrap();
}

fn run_pipeline(dir: &Path) {
    Command::cargo_bin("clique_topics").unwrap()
        .current_dir(dir)
        .args(["cliques", "communities", "dnld_tweets", "tweets.dict", "tweets_2_lda", "user_topics_2", "--no-charts"])
        .assert()
        .success();
}

#[test]
fn pipeline_writes_every_artifact() {

    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    run_pipeline(dir.path());

    let root = dir.path().join("aggregated_tweets");
    let out = root.join("user_topics_2");

    assert_eq!(
        fs::read_to_string(root.join("clique_0")).unwrap(),
        "What a match! #football\nthe goal was great\nfootball football goal\n"
    );
    assert!(root.join("clique_1").is_file());

    let topn = fs::read_to_string(out.join("topn_words.txt")).unwrap();
    assert!(topn.starts_with("Topic #1: \n\tfootball\n\tfootball\n\tgoal\n"));
    assert!(topn.contains("Topic #2: \n\trust\n"));

    let vecs = DocVectors::load_or_default(&out.join("document_vectors.bin")).unwrap();
    assert_eq!(vecs.len(), 2);
    for name in ["clique_0", "clique_1"] {
        assert!((vecs.get(name).unwrap().sum() - 1.0).abs() < 1e-5);
    }

    let distances = fs::read_to_string(out.join("community_user_distances").join("jensen_shannon_community_0")).unwrap();
    let rows: Vec<Vec<&str>> = distances.lines().map(|l| l.split('\t').collect()).collect();
    assert_eq!(rows.iter().map(|r| r[0]).collect::<Vec<&str>>(), vec!["1", "2", "3"]);
    let jsd: Vec<f64> = rows.iter().map(|r| r[2].parse().unwrap()).collect();
    assert!(jsd[0] < jsd[2] && jsd[1] < jsd[2], "{:?}", jsd);
    assert!(out.join("community_user_distances").join("jensen_shannon_community_1").is_file());
}

#[test]
fn cached_member_vectors_give_the_same_report() {

    let fresh = tempfile::tempdir().unwrap();
    write_fixture(fresh.path());
    run_pipeline(fresh.path());

    let cached = tempfile::tempdir().unwrap();
    write_fixture(cached.path());
    Command::cargo_bin("community_vectors").unwrap()
        .current_dir(cached.path())
        .args(["communities", "dnld_tweets", "tweets.dict", "tweets_2_lda", "user_topics_2/all_community_doc_vecs.bin", "--threads", "2"])
        .assert()
        .success();

    let member_vecs = DocVectors::load_or_default(&cached.path().join("user_topics_2").join("all_community_doc_vecs.bin")).unwrap();
    assert_eq!(member_vecs.keys().cloned().collect::<Vec<String>>(), vec!["1", "2", "3", "5"]);

    run_pipeline(cached.path());

    let report = |dir: &Path| fs::read_to_string(
        dir.join("aggregated_tweets/user_topics_2/community_user_distances/jensen_shannon_community_0")
    ).unwrap();
    assert_eq!(report(fresh.path()), report(cached.path()));
}

#[test]
fn missing_positionals_fail() {
    Command::cargo_bin("clique_topics").unwrap()
        .args(["cliques", "communities"])
        .assert()
        .failure();
}

#[test]
fn malformed_topology_fails() {

    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::write(dir.path().join("cliques"), "[1, 2\n").unwrap();

    Command::cargo_bin("clique_topics").unwrap()
        .current_dir(dir.path())
        .args(["cliques", "communities", "dnld_tweets", "tweets.dict", "tweets_2_lda", "user_topics_2", "--no-charts"])
        .assert()
        .failure();
}
