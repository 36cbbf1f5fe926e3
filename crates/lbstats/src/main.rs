//! lbstats - Entry Point
//!
//! Binary entry point for the `lbstats` command.

// Force-link lbstats-providers so the linkme cache registrations are included
extern crate lbstats_providers;

use clap::Parser;
use lbstats::cli::{Cli, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Cli::parse()).await
}
