use crate::error::{Error, Result};

use ndarray::Array1;
use ndarray_stats::QuantileExt;
use plotters::prelude::*;
use std::path::{Path, PathBuf};


pub struct DistributionGraph {}

impl DistributionGraph {

    pub fn output_path(graphs_dir: &Path, name: &str) -> PathBuf {
        graphs_dir.join(format!("{}.png", name))
    }

    /// Bar chart of a topic distribution, topics numbered from 1. Skipped when `save_to` exists.
    /// Returns whether the chart was drawn.
    pub fn draw(save_to: &Path, dense_vec: &Array1<f32>) -> Result<bool> {

        if save_to.exists() {
            log::debug!("{} exists, not drawing", save_to.display());
            return Ok(false)
        }

        log::info!("drawing probability distribution graph {}", save_to.display());
        DistributionGraph::draw_bars(save_to, dense_vec).map_err(|e| Error::Plot {
            path: save_to.to_path_buf(),
            reason: e.to_string()
        })?;

        Ok(true)
    }

    fn draw_bars(save_to: &Path, dense_vec: &Array1<f32>) -> std::result::Result<(), Box<dyn std::error::Error>> {

        const MARGIN: u32 = 15;
        const FONT_STYLE: (&str, i32) = ("sans-serif", 20);

        // probabilities, leave a little room above the highest bar
        let n_topics = dense_vec.len();
        let y_max = *dense_vec.max()? + 0.01;

        let root_area = BitMapBackend::new(save_to, (800, 600)).into_drawing_area();
        root_area.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root_area)
        .caption("Topic Distribution for clique", FONT_STYLE)
        .margin(MARGIN)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f32..(n_topics + 1) as f32, 0f32..y_max)?;

        chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Topics")
        .y_desc("Probability")
        .x_labels((n_topics / 2).max(2))
        .x_label_formatter(&|x: &f32| format!("{}", x.round() as i64))
        .draw()?;

        // one bar of width 1 centered on each topic number
        chart.draw_series(dense_vec.iter().enumerate().map(|(topic, p)| {
            let x = (topic + 1) as f32;
            Rectangle::new([(x - 0.5, 0.0), (x + 0.5, *p)], RED.filled())
        }))?;

        root_area.present()?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {

    use super::DistributionGraph;
    use crate::error::Error;
    use ndarray::{array, Array1};
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn names_chart_after_document() {
        let path = DistributionGraph::output_path(&PathBuf::from("graphs"), "clique_4");
        assert_eq!(path, PathBuf::from("graphs/clique_4.png"));
    }

    #[test]
    fn existing_chart_is_not_redrawn() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clique_0.png");
        fs::write(&path, b"not really a png").unwrap();

        let drawn = DistributionGraph::draw(&path, &array![0.25, 0.75]).unwrap();
        assert!(!drawn);
        assert_eq!(fs::read(&path).unwrap(), b"not really a png");
    }

    #[test]
    fn draws_png_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = DistributionGraph::output_path(dir.path(), "clique_2");

        let drawn = DistributionGraph::draw(&path, &array![0.1, 0.6, 0.3]).unwrap();
        assert!(drawn);
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn empty_distribution_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clique_0.png");

        let result = DistributionGraph::draw(&path, &Array1::<f32>::zeros(0));
        assert!(matches!(result, Err(Error::Plot { .. })));
        assert!(!path.exists());
    }
}
