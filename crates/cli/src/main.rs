// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod error;

#[cfg(test)]
mod tests;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use recycling_center_domain::SchemaRegistry;
use recycling_center_persistence::Persistence;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

use crate::commands::DatabaseTarget;
use crate::error::CliError;

/// Recycling Center - records maintenance for the recycling center database
#[derive(Debug, Parser)]
#[command(name = "recycling-center", author, version, about, long_about = None)]
struct Args {
    /// `SQLite` database file or `mysql://` URL. If not provided, uses an in-memory database.
    #[arg(short, long, env = "RECYCLING_CENTER_DATABASE", global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    fn run(&self) -> Result<String, CliError> {
        match self.command {
            Command::Schema => commands::schema_report(&SchemaRegistry::recycling_center()),
            Command::Migrate => {
                let mut persistence: Persistence = self.target().open()?;
                commands::migrate(&mut persistence)
            }
            Command::Stats => {
                let mut persistence: Persistence = self.target().open()?;
                commands::stats_report(&mut persistence)
            }
        }
    }

    fn target(&self) -> DatabaseTarget {
        DatabaseTarget::from_arg(self.database.as_deref())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// Print the entities in dependency order with their relations
    #[command(visible_alias = "s")]
    Schema,

    /// Open the database, apply pending migrations and verify the schema
    #[command(visible_alias = "m")]
    Migrate,

    /// Print row counts per table as JSON
    #[command(visible_alias = "st")]
    Stats,
}

fn main() {
    let args: Args = Args::parse();

    // RUST_LOG takes precedence over -v/-q.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(args.log_level().into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(command = ?args.command, "Starting recycling-center");

    match args.run() {
        Ok(report) => println!("{report}"),
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
}
