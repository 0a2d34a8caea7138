// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use recycling_center_domain::DomainError;
use recycling_center_persistence::PersistenceError;
use thiserror::Error;

/// Errors surfaced by the command line.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening or querying the database failed.
    #[error("Database error: {0}")]
    Persistence(#[from] PersistenceError),

    /// The schema registry is inconsistent.
    #[error("Schema error: {0}")]
    Schema(#[from] DomainError),

    /// A report could not be rendered as JSON.
    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),

    /// A text report could not be written.
    #[error("Failed to write report: {0}")]
    Format(#[from] std::fmt::Error),
}
