// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;
use recycling_center_domain::{DomainError, EntityKind};

/// Broad classification of persistence errors for callers that translate
/// them into protocol responses (e.g. HTTP 400 / 404 / 409 / 500).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field value, uniqueness or reference check failed.
    Validation,
    /// The addressed record does not exist.
    NotFound,
    /// The record cannot be deleted while other records reference it.
    ReferentialIntegrity,
    /// The database itself failed.
    Storage,
}

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A field failed domain validation.
    Validation(DomainError),
    /// A unique column already holds this value.
    DuplicateValue {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },
    /// A foreign-key field points at a record that does not exist.
    MissingReference {
        entity: EntityKind,
        field: &'static str,
        id: i64,
    },
    /// The requested record was not found.
    NotFound { entity: EntityKind, id: i64 },
    /// The record cannot be deleted: other records reference it.
    Referenced {
        entity: EntityKind,
        id: i64,
        /// Tables holding the referencing rows.
        dependents: Vec<&'static str>,
    },
    /// The database rejected a write on a unique constraint.
    UniqueViolation(String),
    /// The database rejected a write on a foreign-key constraint.
    ForeignKeyViolation(String),
    /// The database rejected a write on a CHECK or NOT NULL constraint.
    CheckViolation(String),
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A registered table is missing after migrations.
    SchemaMismatch(String),
    /// A stored value could not be converted back into a domain value.
    SerializationError(String),
}

impl PersistenceError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_)
            | Self::DuplicateValue { .. }
            | Self::MissingReference { .. }
            | Self::UniqueViolation(_)
            | Self::CheckViolation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Referenced { .. } | Self::ForeignKeyViolation(_) => {
                ErrorKind::ReferentialIntegrity
            }
            Self::DatabaseError(_)
            | Self::DatabaseConnectionFailed(_)
            | Self::MigrationFailed(_)
            | Self::QueryFailed(_)
            | Self::InitializationError(_)
            | Self::ForeignKeyEnforcementNotEnabled
            | Self::SchemaMismatch(_)
            | Self::SerializationError(_) => ErrorKind::Storage,
        }
    }

    /// Returns the field a validation error refers to, when known.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation(err) => err.field(),
            Self::DuplicateValue { field, .. } | Self::MissingReference { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "Validation failed: {err}"),
            Self::DuplicateValue {
                entity,
                field,
                value,
            } => {
                write!(f, "{entity} with {field} '{value}' already exists")
            }
            Self::MissingReference { entity, field, id } => {
                write!(f, "{field} refers to {entity} {id}, which does not exist")
            }
            Self::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
            Self::Referenced {
                entity,
                id,
                dependents,
            } => {
                write!(
                    f,
                    "{entity} {id} cannot be deleted: referenced by {}",
                    dependents.join(", ")
                )
            }
            Self::UniqueViolation(msg) => write!(f, "Unique constraint violated: {msg}"),
            Self::ForeignKeyViolation(msg) => {
                write!(f, "Foreign key constraint violated: {msg}")
            }
            Self::CheckViolation(msg) => write!(f, "Check constraint violated: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::SchemaMismatch(msg) => write!(f, "Schema mismatch: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err)
    }
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(kind, info) => {
                let msg: String = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => Self::UniqueViolation(msg),
                    DatabaseErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(msg),
                    DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation => {
                        Self::CheckViolation(msg)
                    }
                    _ => Self::DatabaseError(msg),
                }
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
