use anyhow::Context;
use clique_topics::{logger, Config, Pipeline};
use std::env;

fn main() -> anyhow::Result<()> {

    let params = match Config::new(env::args_os()) {
        Ok(config) => config.get_params(),
        Err(e) => e.exit()
    };

    logger::init_logger()?;

    Pipeline::run(&params).context("clique topic pipeline failed")?;
    Ok(())
}
