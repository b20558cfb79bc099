use anyhow::{Context, Result};
use env_logger::Env;
use log::info;
use std::io;

use linked_list_tour::ListDemo;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    info!("Starting list tour");

    let demo = ListDemo::new(io::stdout().lock());
    demo.run().context("List tour failed")?;

    info!("List tour finished");
    Ok(())
}
