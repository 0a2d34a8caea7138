// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{DomainError, EntityKind, EntitySchema, Relation, SchemaRegistry};

#[test]
fn test_recycling_center_registry_has_all_entities() {
    let registry: SchemaRegistry = SchemaRegistry::recycling_center();

    assert_eq!(registry.entities().len(), 7);
    for kind in EntityKind::ALL {
        let schema: &EntitySchema = registry.entity(kind).unwrap();
        assert_eq!(schema.table(), kind.table_name());
        assert_eq!(schema.primary_key(), kind.primary_key());
    }
    assert_eq!(registry.relations().count(), Relation::ALL.len());
}

#[test]
fn test_unique_columns_are_registered() {
    let registry: SchemaRegistry = SchemaRegistry::recycling_center();

    let material: &EntitySchema = registry.entity(EntityKind::RecyclableMaterial).unwrap();
    assert_eq!(material.unique_columns, vec![String::from("identification_code")]);

    let employee: &EntitySchema = registry.entity(EntityKind::RecyclingEmployee).unwrap();
    assert_eq!(employee.unique_columns, vec![String::from("national_id")]);
}

#[test]
fn test_dependency_order_puts_leaves_first() {
    let order: Vec<EntityKind> = SchemaRegistry::recycling_center()
        .dependency_order()
        .unwrap();

    assert_eq!(order.len(), 7);
    let position = |kind: EntityKind| order.iter().position(|k| *k == kind).unwrap();

    for relation in Relation::ALL {
        assert!(
            position(relation.target()) < position(relation.source()),
            "{relation} is out of order"
        );
    }
    assert_eq!(&order[..4], &EntityKind::ALL[..4]);
}

#[test]
fn test_dependents_of_employee() {
    let registry: SchemaRegistry = SchemaRegistry::recycling_center();
    let dependents: Vec<Relation> = registry.dependents_of(EntityKind::RecyclingEmployee);

    assert_eq!(
        dependents,
        vec![
            Relation::IntakeReceiver,
            Relation::ProcessingEmployee,
            Relation::SaleSeller
        ]
    );
}

#[test]
fn test_sales_have_no_dependents() {
    let registry: SchemaRegistry = SchemaRegistry::recycling_center();
    assert!(registry.dependents_of(EntityKind::MaterialSale).is_empty());
    assert!(registry
        .dependents_of(EntityKind::MaterialProcessing)
        .is_empty());
}

#[test]
fn test_dependency_order_detects_cycles() {
    let mut registry: SchemaRegistry = SchemaRegistry::new();
    // A material pointing at itself through the sale relation's target.
    registry.register(
        EntitySchema::new(EntityKind::RecyclableMaterial).relation(Relation::SaleMaterial),
    );

    let result = registry.dependency_order();
    assert_eq!(
        result,
        Err(DomainError::CyclicDependency(String::from(
            "recyclable_materials"
        )))
    );
}

#[test]
fn test_dependency_order_rejects_unregistered_targets() {
    let mut registry: SchemaRegistry = SchemaRegistry::new();
    registry.register(
        EntitySchema::new(EntityKind::MaterialSale)
            .relation(Relation::SaleMaterial)
            .relation(Relation::SaleSeller),
    );

    assert!(matches!(
        registry.dependency_order(),
        Err(DomainError::UnknownEntity(_))
    ));
}

#[test]
fn test_register_replaces_existing_entry() {
    let mut registry: SchemaRegistry = SchemaRegistry::recycling_center();
    registry.register(EntitySchema::new(EntityKind::Donor).unique("tax_id"));

    assert_eq!(registry.entities().len(), 7);
    let donor: &EntitySchema = registry.entity(EntityKind::Donor).unwrap();
    assert_eq!(donor.unique_columns, vec![String::from("tax_id")]);
}

#[test]
fn test_entity_kind_parses_from_name_or_table() {
    assert_eq!(
        EntityKind::from_str("Donor").unwrap(),
        EntityKind::Donor
    );
    assert_eq!(
        EntityKind::from_str("material_sales").unwrap(),
        EntityKind::MaterialSale
    );
    assert!(matches!(
        EntityKind::from_str("customers"),
        Err(DomainError::UnknownEntity(_))
    ));
}

#[test]
fn test_relation_display() {
    assert_eq!(
        Relation::IntakeReceiver.to_string(),
        "material_intakes.receiver_id -> recycling_employees"
    );
    assert_eq!(Relation::SaleSeller.related_name(), "sales_made");
}
