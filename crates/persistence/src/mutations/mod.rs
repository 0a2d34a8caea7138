// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//! Every create, update and delete runs inside a single transaction so the
//! existence, uniqueness and dependent-row checks see the same data as the
//! write that follows them.
//!
//! ## Module Organization
//!
//! - `catalog`: Material and collection center writes
//! - `people`: Donor and employee writes
//! - `operations`: Intake, processing and sale writes
//! - `removal`: Protected deletes for every entity
//!
//! ## Backend-Specific Code
//!
//! Backend-specific helpers (e.g., `get_last_insert_rowid()`) are reached
//! through the `PersistenceBackend` trait. All other code uses Diesel DSL
//! exclusively.

pub mod catalog;
pub mod operations;
pub mod people;
pub mod removal;

use recycling_center_domain::{EntityKind, Relation};

use crate::backend::PersistenceBackend;
use crate::error::PersistenceError;

/// Fails with `NotFound` unless a row of `kind` with `id` exists.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` or a query error.
pub fn ensure_exists<C: PersistenceBackend>(
    conn: &mut C,
    kind: EntityKind,
    id: i64,
) -> Result<(), PersistenceError> {
    if conn.row_exists(kind, id)? {
        Ok(())
    } else {
        Err(PersistenceError::NotFound { entity: kind, id })
    }
}

/// Fails with `MissingReference` unless the target of `relation` exists.
///
/// # Errors
///
/// Returns `PersistenceError::MissingReference` or a query error.
pub fn ensure_reference<C: PersistenceBackend>(
    conn: &mut C,
    relation: Relation,
    id: i64,
) -> Result<(), PersistenceError> {
    if conn.row_exists(relation.target(), id)? {
        Ok(())
    } else {
        Err(PersistenceError::MissingReference {
            entity: relation.target(),
            field: relation.column(),
            id,
        })
    }
}

/// Fails with `DuplicateValue` if another row already holds `value` in `field`.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateValue` or a query error.
pub fn ensure_unique<C: PersistenceBackend>(
    conn: &mut C,
    kind: EntityKind,
    field: &'static str,
    value: &str,
    exclude_id: Option<i64>,
) -> Result<(), PersistenceError> {
    if conn.unique_value_exists(kind, field, value, exclude_id)? {
        Err(PersistenceError::DuplicateValue {
            entity: kind,
            field,
            value: value.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Fails with `Referenced` if any row on the source side of `dependents`
/// points at `id`.
///
/// The error lists each referencing table once, in relation order.
///
/// # Errors
///
/// Returns `PersistenceError::Referenced` or a query error.
pub fn ensure_unreferenced<C: PersistenceBackend>(
    conn: &mut C,
    kind: EntityKind,
    id: i64,
    dependents: &[Relation],
) -> Result<(), PersistenceError> {
    let mut blocking: Vec<&'static str> = Vec::new();
    for relation in dependents {
        let table: &'static str = relation.source().table_name();
        if blocking.contains(&table) {
            continue;
        }
        if conn.count_references(*relation, id)? > 0 {
            blocking.push(table);
        }
    }

    if blocking.is_empty() {
        Ok(())
    } else {
        Err(PersistenceError::Referenced {
            entity: kind,
            id,
            dependents: blocking,
        })
    }
}
