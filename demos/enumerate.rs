//! Enumeration Example
//!
//! Loads a fixture set and prints every assignment that sums to its target.
//!
//! Use `-f` to load a fixture set by name
//! Use `-p` to override the target total
//! Use `-s` to pick the search strategy (`tree` or `backtrack`)
//! Set `RUST_LOG=allot=debug` to see stage-by-stage logging

use std::{io, time::Instant};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use allot::{fixtures::Fixture, report::Report, utils::ExampleSearchArgs};

/// Enumeration Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_target(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = ExampleSearchArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let group = fixture.group()?;
    let (pick, config) = args.apply(fixture.pick()?, fixture.config()?);

    let start = Instant::now();
    let result = config.solve(group, pick)?;
    let elapsed = start.elapsed().as_secs_f32();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Report::new(group, &result).write_to(&mut handle)?;

    println!("\nPick {pick} with {:?}: {elapsed}s", config.strategy);

    Ok(())
}
