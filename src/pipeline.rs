// imports
use crate::aggregate::Aggregate;
use crate::config::Params;
use crate::error::{Error, Result};
use crate::plot::DistributionGraph;
use crate::report::Report;
use crate::topology::read_groups;
use crate::vectorize::{DocVectors, Vectorizer};

use std::fs;
use std::path::Path;
use std::time::Instant;

pub struct Pipeline {}

impl Pipeline {

    // runs the whole batch, every step is skipped at the granularity of its output file -
    // -> load dictionary and model, prepare output folders, top words per topic
    // -> aggregate the tweets of every clique
    // -> topic vectors (cached) and charts for every aggregated file
    // -> Jensen-Shannon distances between each clique and its community members

    pub fn run(params: &Params) -> Result<()> {

        log::info!("{}", params);
        let timer = Instant::now();

        let vectorizer = Vectorizer::load(&params.dictionary, &params.model)?;

        for dir in [&params.aggregated_dir, &params.graphs_dir, &params.distances_dir] {
            fs::create_dir_all(dir)?;
        }

        Report::write_topn_words(&vectorizer, params.topn, &params.topn_words_file)?;

        // aggregation
        let cliques = read_groups(&params.clique_topology)?;
        let mut aggregated = 0;
        for clique in &cliques {
            if Aggregate::run(clique, &params.tweets_dir, &params.aggregated_dir)? {
                aggregated += 1;
            }
        }
        log::info!("{} cliques, {} newly aggregated", cliques.len(), aggregated);

        // clique vectors and charts
        let clique_vecs = Pipeline::clique_vectors(params, &vectorizer)?;

        // distances
        if !params.community_vectors_file.exists() {
            log::warn!("no community vectors at {}, computing member vectors from tweets", params.community_vectors_file.display());
        }
        let community_vecs = DocVectors::load_or_default(&params.community_vectors_file)?;

        let communities = read_groups(&params.community_topology)?;
        for community in &communities {

            let report = Report::distances_path(&params.distances_dir, community.index);
            if report.exists() {
                log::debug!("{} exists, skipping community {}", report.display(), community.index);
                continue
            }

            let clique_vec = clique_vecs
            .get(&Aggregate::file_name(community.index))
            .ok_or(Error::MissingCliqueVector(community.index))?;

            Report::write_distances(community, clique_vec, &vectorizer, &community_vecs, &params.tweets_dir, &report)?;
        }

        log::info!("finished {} communities, took {} seconds ...", communities.len(), timer.elapsed().as_secs());
        Ok(())
    }

    // vectors for every file directly inside the aggregation root, new ones are added to the cache
    fn clique_vectors(params: &Params, vectorizer: &Vectorizer) -> Result<DocVectors> {

        let mut clique_vecs = DocVectors::load_or_default(&params.clique_vectors_file)?;

        let mut added = 0;
        for name in Pipeline::aggregated_files(&params.aggregated_dir)? {

            if !clique_vecs.contains_key(&name) {
                log::info!("getting document vector for {}", name);
                let vec = vectorizer.doc_to_vec(&params.aggregated_dir.join(&name))?;
                clique_vecs.insert(name.clone(), vec);
                added += 1;
            }

            if params.draw_charts {
                if let Some(vec) = clique_vecs.get(&name) {
                    DistributionGraph::draw(&DistributionGraph::output_path(&params.graphs_dir, &name), vec)?;
                }
            }
        }

        // only touch the cache when something changed
        if added > 0 {
            clique_vecs.save(&params.clique_vectors_file)?;
            log::info!("saved {} vectors ({} new) to {}", clique_vecs.len(), added, params.clique_vectors_file.display());
        }

        Ok(clique_vecs)
    }

    // regular files only, the output folders below the root are not visited
    fn aggregated_files(aggregated_dir: &Path) -> Result<Vec<String>> {

        let mut names = Vec::new();
        for entry in fs::read_dir(aggregated_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => log::warn!("skipping non utf-8 file name {:?}", name)
            }
        }
        names.sort();
        Ok(names)
    }

    /// Builds the community member vector cache: every distinct member with a tweet file and no
    /// entry in `output` yet gets its vector. Returns how many were added.
    pub fn community_vectors(community_topology: &Path, tweets_dir: &Path, vectorizer: &Vectorizer, output: &Path) -> Result<usize> {

        let timer = Instant::now();

        let mut users: Vec<String> = read_groups(community_topology)?
            .into_iter()
            .flat_map(|community| community.members)
            .collect();
        users.sort();
        users.dedup();
        log::info!("{} distinct community members", users.len());

        let mut cache = DocVectors::load_or_default(output)?;
        let added = vectorizer.vectorize_users(&users, tweets_dir, &mut cache)?;
        if added > 0 {
            cache.save(output)?;
        }

        log::info!("added {} vectors, {} in {}, took {} seconds ...", added, cache.len(), output.display(), timer.elapsed().as_secs());
        Ok(added)
    }
}
