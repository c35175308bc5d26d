// src/bin/cli.rs
use color_eyre::eyre::{Result, eyre};
use rollcall::cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    cli::run(&args).map_err(|e| eyre!("{e}"))
}
