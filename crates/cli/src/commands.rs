// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommand implementations.
//!
//! Each command returns its report as a `String` so `main` only has to
//! print it.

use recycling_center_domain::{EntityKind, SchemaRegistry};
use recycling_center_persistence::Persistence;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

use crate::error::CliError;

/// Where the records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// A private in-memory `SQLite` database.
    InMemory,
    /// A `SQLite` database file.
    File(PathBuf),
    /// A MySQL/MariaDB connection URL.
    Mysql(String),
}

impl DatabaseTarget {
    /// Interprets the `--database` argument.
    #[must_use]
    pub fn from_arg(database: Option<&str>) -> Self {
        match database {
            None => Self::InMemory,
            Some(url) if url.starts_with("mysql://") => Self::Mysql(url.to_string()),
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }

    /// Opens the database and applies any pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection, the migrations or the startup
    /// checks fail.
    pub fn open(&self) -> Result<Persistence, CliError> {
        let persistence: Persistence = match self {
            Self::InMemory => {
                info!("Using in-memory database");
                Persistence::new_in_memory()?
            }
            Self::File(path) => {
                info!(path = %path.display(), "Using file-based database");
                Persistence::new_with_file(path)?
            }
            Self::Mysql(url) => {
                info!("Using MySQL/MariaDB database");
                Persistence::new_with_mysql(url)?
            }
        };
        Ok(persistence)
    }
}

/// Lists the registered entities in dependency order with their relations.
///
/// # Errors
///
/// Returns an error if the registry has a dangling relation or a cycle.
pub fn schema_report(registry: &SchemaRegistry) -> Result<String, CliError> {
    let order: Vec<EntityKind> = registry.dependency_order()?;
    let mut report: String = String::new();

    for (position, kind) in order.iter().enumerate() {
        let Some(schema) = registry.entity(*kind) else {
            continue;
        };
        writeln!(
            report,
            "{}. {kind} ({}, key {})",
            position + 1,
            schema.table(),
            schema.primary_key()
        )?;
        for column in &schema.unique_columns {
            writeln!(report, "     unique {column}")?;
        }
        for relation in &schema.relations {
            writeln!(report, "     {relation} as {}", relation.related_name())?;
        }
    }

    Ok(report)
}

/// Verifies an opened database and reports that it is current.
///
/// # Errors
///
/// Returns an error if foreign key enforcement is off or a registered table
/// is missing.
pub fn migrate(persistence: &mut Persistence) -> Result<String, CliError> {
    persistence.verify_foreign_key_enforcement()?;
    persistence.verify_registered_tables()?;
    info!("Database schema is up to date");
    Ok(format!(
        "Schema up to date: {} tables verified",
        persistence.registry().entities().len()
    ))
}

/// Row count for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub entity: EntityKind,
    pub table: String,
    pub rows: usize,
}

/// Counts rows for every registered entity, leaves first.
///
/// # Errors
///
/// Returns an error if the registry is inconsistent or a count fails.
pub fn collect_stats(persistence: &mut Persistence) -> Result<Vec<TableStats>, CliError> {
    let order: Vec<EntityKind> = persistence.registry().dependency_order()?;
    let mut stats: Vec<TableStats> = Vec::with_capacity(order.len());

    for kind in order {
        let table: String = kind.table_name().to_string();
        let rows: usize = persistence.count_rows(kind)?;
        stats.push(TableStats {
            entity: kind,
            table,
            rows,
        });
    }

    Ok(stats)
}

/// Renders [`collect_stats`] as pretty JSON.
///
/// # Errors
///
/// Returns an error if counting or serialization fails.
pub fn stats_report(persistence: &mut Persistence) -> Result<String, CliError> {
    let stats: Vec<TableStats> = collect_stats(persistence)?;
    Ok(serde_json::to_string_pretty(&stats)?)
}
