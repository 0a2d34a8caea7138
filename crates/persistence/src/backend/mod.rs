// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! This module isolates backend-specific initialization, migration,
//! and helper functions that cannot be expressed in backend-agnostic
//! Diesel DSL.
//!
//! ## Backend Support
//!
//! - `sqlite`: `SQLite` backend (default for development and testing)
//! - `mysql`: MySQL/MariaDB backend (validated via opt-in tests)
//!
//! ## Backend-Agnostic Code
//!
//! Backend-specific code is limited to:
//!
//! - Connection initialization
//! - Migration execution
//! - Backend-specific configuration (e.g., PRAGMA, engine settings)
//! - Catalog lookups (`sqlite_master` vs `information_schema`)
//! - Retrieving the last inserted row ID
//!
//! All record queries and mutations live in `queries/` and `mutations/`
//! and must work across all supported backends.

pub mod mysql;
pub mod sqlite;

use diesel::{Connection, MysqlConnection, SqliteConnection};
use recycling_center_domain::{EntityKind, Relation};

use crate::error::PersistenceError;
use crate::queries::references;

/// Trait for operations shared by every backend connection.
///
/// Mutation bodies are generated once per backend by `backend_fn!` and cannot
/// call each other's suffixed functions directly; they reach shared lookups
/// through this trait instead.
pub trait PersistenceBackend: Connection {
    /// Retrieves the last inserted row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;

    /// Returns whether a table with the given name exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails.
    fn table_exists(&mut self, table: &str) -> Result<bool, PersistenceError>;

    /// Returns whether a row of `kind` with the given id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn row_exists(&mut self, kind: EntityKind, id: i64) -> Result<bool, PersistenceError>;

    /// Counts rows on the source side of `relation` that point at `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn count_references(&mut self, relation: Relation, id: i64) -> Result<i64, PersistenceError>;

    /// Returns whether another row of `kind` already holds `value` in the
    /// unique column `field`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or `field` is not a unique column of `kind`.
    fn unique_value_exists(
        &mut self,
        kind: EntityKind,
        field: &str,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }

    fn table_exists(&mut self, table: &str) -> Result<bool, PersistenceError> {
        sqlite::table_exists(self, table)
    }

    fn row_exists(&mut self, kind: EntityKind, id: i64) -> Result<bool, PersistenceError> {
        references::row_exists_sqlite(self, kind, id)
    }

    fn count_references(&mut self, relation: Relation, id: i64) -> Result<i64, PersistenceError> {
        references::count_references_sqlite(self, relation, id)
    }

    fn unique_value_exists(
        &mut self,
        kind: EntityKind,
        field: &str,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, PersistenceError> {
        references::unique_value_exists_sqlite(self, kind, field, value, exclude_id)
    }
}

impl PersistenceBackend for MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }

    fn table_exists(&mut self, table: &str) -> Result<bool, PersistenceError> {
        mysql::table_exists(self, table)
    }

    fn row_exists(&mut self, kind: EntityKind, id: i64) -> Result<bool, PersistenceError> {
        references::row_exists_mysql(self, kind, id)
    }

    fn count_references(&mut self, relation: Relation, id: i64) -> Result<i64, PersistenceError> {
        references::count_references_mysql(self, relation, id)
    }

    fn unique_value_exists(
        &mut self,
        kind: EntityKind,
        field: &str,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, PersistenceError> {
        references::unique_value_exists_mysql(self, kind, field, value, exclude_id)
    }
}
