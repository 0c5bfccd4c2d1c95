// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `talent-admin` - operator CLI for the talent placement workflow.
//!
//! Every subcommand opens the store, builds a workflow engine whose audit
//! sink shares the same database, runs one operation and prints the result
//! as JSON on stdout. Logs go to stderr.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod cli;
mod commands;
mod fixtures;

#[cfg(test)]
mod tests;

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    let filter: EnvFilter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match commands::run(args) {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}
