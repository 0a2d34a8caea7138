// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schema parity between the `SQLite` and `MySQL` migration sets.
//!
//! Both sets are applied to empty databases, each schema is read back from
//! the catalog into a [`SchemaShape`], and the shapes are compared after
//! normalising backend-specific types. Every difference is reported, not
//! just the first.

use std::collections::{BTreeMap, BTreeSet};

use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::mariadb::{self, MariadbContainer};

const SQLITE_MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");
const MYSQL_MIGRATIONS: EmbeddedMigrations =
    embed_migrations!("../crates/persistence/migrations_mysql");

/// Diesel's own bookkeeping table, present on both sides.
const MIGRATIONS_TABLE: &str = "__diesel_schema_migrations";

/// The comparable shape of a whole schema, keyed by table name.
type SchemaShape = BTreeMap<String, TableShape>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TableShape {
    /// Column name to (normalised type, nullable).
    columns: BTreeMap<String, (String, bool)>,
    primary_key: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique: BTreeSet<Vec<String>>,
    /// Non-unique indexes: name to columns.
    indexes: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    column: String,
    target_table: String,
    target_column: String,
    on_delete: String,
}

/// Applies both migration sets and fails if the schemas differ.
///
/// # Errors
///
/// Returns an error if Docker or `MariaDB` is unavailable, a migration fails,
/// or the schemas do not match.
pub fn verify_migrations() -> Result<()> {
    tracing::info!("Starting schema parity verification");
    let container: MariadbContainer =
        MariadbContainer::start("recycling-center-verify-migrations", 3308)?;

    tracing::info!("Applying SQLite migrations");
    let mut sqlite = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut sqlite)
        .wrap_err("Failed to enable foreign keys on SQLite")?;
    sqlite
        .run_pending_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply SQLite migrations: {e}"))?;

    tracing::info!("Applying MySQL migrations");
    let mut mysql = MysqlConnection::establish(&container.database_url())
        .wrap_err("Failed to connect to MariaDB")?;
    mysql
        .run_pending_migrations(MYSQL_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply MySQL migrations: {e}"))?;

    let sqlite_shape: SchemaShape = sqlite_schema(&mut sqlite)?;
    let mysql_shape: SchemaShape = mysql_schema(&mut mysql, mariadb::DATABASE)?;

    let differences: Vec<String> = compare(&sqlite_shape, &mysql_shape);
    if differences.is_empty() {
        tracing::info!(tables = sqlite_shape.len(), "Schema parity verification passed");
        Ok(())
    } else {
        Err(eyre!(
            "Schema parity check failed:\n{}",
            differences.join("\n")
        ))
    }
}

fn sqlite_schema(conn: &mut SqliteConnection) -> Result<SchemaShape> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
        #[diesel(sql_type = Text)]
        on_delete: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumn {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    let mut schema: SchemaShape = SchemaShape::new();
    for table in tables.into_iter().filter(|t| t.name != MIGRATIONS_TABLE) {
        let mut shape: TableShape = TableShape::default();

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get columns for table {}", table.name))?;
        for column in columns {
            // An INTEGER PRIMARY KEY aliases the rowid and can never be NULL,
            // whatever table_info reports.
            let nullable: bool = column.notnull == 0 && column.pk == 0;
            if column.pk > 0 {
                shape.primary_key.insert(column.name.clone());
            }
            shape
                .columns
                .insert(column.name, (normalize_type(&column.r#type), nullable));
        }

        let foreign_keys: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get foreign keys for table {}", table.name))?;
        shape.foreign_keys = foreign_keys
            .into_iter()
            .map(|fk| ForeignKey {
                column: fk.from,
                target_table: fk.table,
                target_column: fk.to,
                on_delete: fk.on_delete.to_uppercase(),
            })
            .collect();

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get indexes for table {}", table.name))?;
        for index in indexes {
            let columns: Vec<String> =
                diesel::sql_query(format!("PRAGMA index_info({})", index.name))
                    .load::<IndexColumn>(conn)
                    .wrap_err_with(|| format!("Failed to get columns for index {}", index.name))?
                    .into_iter()
                    .map(|c| c.name)
                    .collect();
            match index.origin.as_str() {
                "u" => {
                    shape.unique.insert(columns);
                }
                "c" => {
                    shape.indexes.insert(index.name, columns);
                }
                _ => {}
            }
        }

        schema.insert(table.name, shape);
    }

    Ok(schema)
}

#[allow(clippy::too_many_lines)]
fn mysql_schema(conn: &mut MysqlConnection, database: &str) -> Result<SchemaShape> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        table_name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        data_type: String,
        #[diesel(sql_type = Text)]
        is_nullable: String,
        #[diesel(sql_type = Text)]
        column_key: String,
    }

    #[derive(QueryableByName)]
    #[allow(clippy::struct_field_names)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        referenced_table_name: String,
        #[diesel(sql_type = Text)]
        referenced_column_name: String,
        #[diesel(sql_type = Text)]
        delete_rule: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumn {
        #[diesel(sql_type = Text)]
        index_name: String,
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = BigInt)]
        non_unique: i64,
    }

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT table_name AS table_name FROM information_schema.tables \
         WHERE table_schema = ? ORDER BY table_name",
    )
    .bind::<Text, _>(database)
    .load(conn)
    .wrap_err("Failed to query MySQL tables")?;

    let mut schema: SchemaShape = SchemaShape::new();
    for table in tables.into_iter().filter(|t| t.table_name != MIGRATIONS_TABLE) {
        let mut shape: TableShape = TableShape::default();

        let columns: Vec<ColumnInfo> = diesel::sql_query(
            "SELECT column_name AS column_name, data_type AS data_type, \
                    is_nullable AS is_nullable, column_key AS column_key \
             FROM information_schema.columns \
             WHERE table_schema = ? AND table_name = ? ORDER BY ordinal_position",
        )
        .bind::<Text, _>(database)
        .bind::<Text, _>(&table.table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to get columns for table {}", table.table_name))?;
        for column in columns {
            if column.column_key == "PRI" {
                shape.primary_key.insert(column.column_name.clone());
            }
            shape.columns.insert(
                column.column_name,
                (normalize_type(&column.data_type), column.is_nullable == "YES"),
            );
        }

        let foreign_keys: Vec<ForeignKeyInfo> = diesel::sql_query(
            "SELECT kcu.column_name AS column_name, \
                    kcu.referenced_table_name AS referenced_table_name, \
                    kcu.referenced_column_name AS referenced_column_name, \
                    rc.delete_rule AS delete_rule \
             FROM information_schema.key_column_usage kcu \
             JOIN information_schema.referential_constraints rc \
               ON rc.constraint_schema = kcu.table_schema \
              AND rc.constraint_name = kcu.constraint_name \
             WHERE kcu.table_schema = ? AND kcu.table_name = ? \
               AND kcu.referenced_table_name IS NOT NULL",
        )
        .bind::<Text, _>(database)
        .bind::<Text, _>(&table.table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to get foreign keys for table {}", table.table_name))?;
        shape.foreign_keys = foreign_keys
            .into_iter()
            .map(|fk| ForeignKey {
                column: fk.column_name,
                target_table: fk.referenced_table_name,
                target_column: fk.referenced_column_name,
                on_delete: fk.delete_rule.to_uppercase(),
            })
            .collect();

        let index_columns: Vec<IndexColumn> = diesel::sql_query(
            "SELECT index_name AS index_name, column_name AS column_name, \
                    CAST(non_unique AS SIGNED) AS non_unique \
             FROM information_schema.statistics \
             WHERE table_schema = ? AND table_name = ? AND index_name != 'PRIMARY' \
             ORDER BY index_name, seq_in_index",
        )
        .bind::<Text, _>(database)
        .bind::<Text, _>(&table.table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to get indexes for table {}", table.table_name))?;

        let mut unique: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for column in index_columns {
            let target: &mut BTreeMap<String, Vec<String>> = if column.non_unique == 0 {
                &mut unique
            } else {
                &mut shape.indexes
            };
            target
                .entry(column.index_name)
                .or_default()
                .push(column.column_name);
        }
        shape.unique = unique.into_values().collect();

        schema.insert(table.table_name, shape);
    }

    Ok(schema)
}

/// Maps a declared column type onto `integer`, `text`, `real` or `blob`.
fn normalize_type(declared: &str) -> String {
    let upper: String = declared.to_uppercase();
    let normalized: &str = if upper.contains("INT") {
        "integer"
    } else if upper.contains("CHAR") || upper.contains("TEXT") || upper.contains("CLOB") {
        "text"
    } else if ["REAL", "FLOA", "DOUB", "DEC", "NUM"]
        .iter()
        .any(|t| upper.contains(t))
    {
        "real"
    } else if upper.contains("BLOB") || upper.contains("BINARY") {
        "blob"
    } else {
        "text"
    };
    normalized.to_string()
}

fn compare(sqlite: &SchemaShape, mysql: &SchemaShape) -> Vec<String> {
    let mut differences: Vec<String> = Vec::new();

    for name in sqlite.keys().filter(|t| !mysql.contains_key(*t)) {
        differences.push(format!("  - table '{name}' exists in SQLite but not in MySQL"));
    }
    for name in mysql.keys().filter(|t| !sqlite.contains_key(*t)) {
        differences.push(format!("  - table '{name}' exists in MySQL but not in SQLite"));
    }

    for (name, lite) in sqlite {
        let Some(my) = mysql.get(name) else {
            continue;
        };
        compare_table(name, lite, my, &mut differences);
    }

    differences
}

fn compare_table(name: &str, sqlite: &TableShape, mysql: &TableShape, out: &mut Vec<String>) {
    for (column, lite) in &sqlite.columns {
        match mysql.columns.get(column) {
            None => out.push(format!("  - {name}.{column} exists in SQLite but not in MySQL")),
            Some(my) if my != lite => out.push(format!(
                "  - {name}.{column}: SQLite {lite:?} vs MySQL {my:?} (type, nullable)"
            )),
            Some(_) => {}
        }
    }
    for column in mysql.columns.keys().filter(|c| !sqlite.columns.contains_key(*c)) {
        out.push(format!("  - {name}.{column} exists in MySQL but not in SQLite"));
    }

    if sqlite.primary_key != mysql.primary_key {
        out.push(format!(
            "  - {name} primary key: SQLite {:?} vs MySQL {:?}",
            sqlite.primary_key, mysql.primary_key
        ));
    }
    if sqlite.foreign_keys != mysql.foreign_keys {
        out.push(format!(
            "  - {name} foreign keys: SQLite {:?} vs MySQL {:?}",
            sqlite.foreign_keys, mysql.foreign_keys
        ));
    }
    if sqlite.unique != mysql.unique {
        out.push(format!(
            "  - {name} unique constraints: SQLite {:?} vs MySQL {:?}",
            sqlite.unique, mysql.unique
        ));
    }

    // InnoDB may add its own single-column index for a foreign key.
    let fk_columns: BTreeSet<&String> = mysql.foreign_keys.iter().map(|fk| &fk.column).collect();
    for (index, columns) in &sqlite.indexes {
        if mysql.indexes.get(index) != Some(columns) {
            out.push(format!("  - index {name}.{index} {columns:?} is missing in MySQL"));
        }
    }
    for (index, columns) in &mysql.indexes {
        let fk_index: bool = columns.len() == 1 && fk_columns.contains(&columns[0]);
        if !sqlite.indexes.contains_key(index) && !fk_index {
            out.push(format!("  - index {name}.{index} {columns:?} exists only in MySQL"));
        }
    }
}
