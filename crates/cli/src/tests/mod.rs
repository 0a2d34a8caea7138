// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;
use recycling_center_domain::{
    EntityKind, EntitySchema, MaterialFields, Relation, SchemaRegistry,
};
use std::path::PathBuf;

use crate::commands::{self, DatabaseTarget, TableStats};
use crate::error::CliError;
use crate::{Args, Command};

fn pet_plastic() -> MaterialFields {
    MaterialFields {
        name: String::from("PET Plastic"),
        description: String::new(),
        category: String::from("Plastic"),
        price_per_kg: "1.50".parse().expect("valid decimal"),
        unit_of_measure: String::from("kg"),
        is_toxic: false,
        recommended_drop_off: String::new(),
        identification_code: String::from("MAT-001"),
    }
}

#[test]
fn test_database_argument_selects_backend() {
    assert_eq!(DatabaseTarget::from_arg(None), DatabaseTarget::InMemory);
    assert_eq!(
        DatabaseTarget::from_arg(Some("records.db")),
        DatabaseTarget::File(PathBuf::from("records.db"))
    );
    assert_eq!(
        DatabaseTarget::from_arg(Some("mysql://user:pw@localhost/recycling")),
        DatabaseTarget::Mysql(String::from("mysql://user:pw@localhost/recycling"))
    );
}

#[test]
fn test_args_parse_subcommand_and_database() {
    let args = Args::try_parse_from(["recycling-center", "stats", "--database", "records.db"])
        .expect("arguments should parse");

    assert_eq!(args.command, Command::Stats);
    assert_eq!(args.database.as_deref(), Some("records.db"));
}

#[test]
fn test_args_accept_command_aliases() {
    let args = Args::try_parse_from(["recycling-center", "-v", "s"]).expect("alias should parse");
    assert_eq!(args.command, Command::Schema);
}

#[test]
fn test_args_require_a_subcommand() {
    assert!(Args::try_parse_from(["recycling-center"]).is_err());
}

#[test]
fn test_schema_report_lists_leaves_before_operations() {
    let report: String = commands::schema_report(&SchemaRegistry::recycling_center())
        .expect("canonical registry is acyclic");

    let material = report.find("recyclable_materials").expect("materials listed");
    let intake = report.find("material_intakes (").expect("intakes listed");
    let sale = report.find("material_sales (").expect("sales listed");
    assert!(material < intake);
    assert!(intake < sale);
    assert!(report.contains("unique identification_code"));
    assert!(report.contains("material_sales.seller_id -> recycling_employees as sales_made"));
}

#[test]
fn test_schema_report_rejects_dangling_relation() {
    let mut registry: SchemaRegistry = SchemaRegistry::new();
    registry
        .register(EntitySchema::new(EntityKind::MaterialIntake).relation(Relation::IntakeDonor));

    let err = commands::schema_report(&registry).unwrap_err();

    assert!(matches!(err, CliError::Schema(_)));
}

#[test]
fn test_schema_report_writes_every_registered_entity() {
    let report: String = commands::schema_report(&SchemaRegistry::recycling_center())
        .expect("canonical registry is acyclic");

    assert_eq!(report.lines().filter(|l| l.contains(", key ")).count(), 7);
    assert!(report.contains("(recycling_employees, key employee_id)"));
    assert!(report.contains("     unique national_id"));
}

#[test]
fn test_report_write_failure_is_a_cli_error() {
    let err: CliError = CliError::from(std::fmt::Error);

    assert!(matches!(err, CliError::Format(_)));
    assert!(err.to_string().starts_with("Failed to write report"));
}

#[test]
fn test_migrate_verifies_in_memory_database() {
    let mut persistence = DatabaseTarget::InMemory.open().expect("in-memory database opens");

    let report: String = commands::migrate(&mut persistence).expect("schema should verify");

    assert_eq!(report, "Schema up to date: 7 tables verified");
}

#[test]
fn test_stats_count_rows_per_table() {
    let mut persistence = DatabaseTarget::InMemory.open().expect("in-memory database opens");
    persistence.create_material(&pet_plastic()).expect("material is valid");

    let stats: Vec<TableStats> = commands::collect_stats(&mut persistence).expect("stats");

    assert_eq!(stats.len(), 7);
    assert_eq!(stats[0].entity, EntityKind::RecyclableMaterial);
    assert_eq!(stats[0].rows, 1);
    assert!(stats[1..].iter().all(|s| s.rows == 0));
}

#[test]
fn test_stats_report_is_json() {
    let mut persistence = DatabaseTarget::InMemory.open().expect("in-memory database opens");

    let report: String = commands::stats_report(&mut persistence).expect("stats report");
    let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");

    assert_eq!(parsed[0]["table"], "recyclable_materials");
    assert_eq!(parsed[0]["rows"], 0);
    assert_eq!(parsed.as_array().map(Vec::len), Some(7));
}
