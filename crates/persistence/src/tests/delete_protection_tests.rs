// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Deletion of referenced records is refused before the database is touched.

use recycling_center_domain::{EntityKind, ProcessingFields};
use time::macros::datetime;

use crate::tests::{create_test_persistence, dec, intake_fields, sale_fields, seed_scenario};
use crate::{ErrorKind, PersistenceError};

#[test]
fn test_referenced_leaf_records_cannot_be_deleted() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);
    persistence.create_intake(&intake_fields(&scenario)).unwrap();

    let material = persistence
        .delete_material(scenario.material.material_id)
        .unwrap_err();
    let center = persistence
        .delete_center(scenario.center.center_id)
        .unwrap_err();
    let donor = persistence
        .delete_donor(scenario.donor.donor_id)
        .unwrap_err();

    assert_eq!(
        material,
        PersistenceError::Referenced {
            entity: EntityKind::RecyclableMaterial,
            id: scenario.material.material_id,
            dependents: vec!["material_intakes"],
        }
    );
    for err in [&material, &center, &donor] {
        assert_eq!(err.kind(), ErrorKind::ReferentialIntegrity);
    }
    assert!(center.to_string().contains("material_intakes"));

    assert_eq!(
        persistence
            .count_rows(EntityKind::CollectionCenter)
            .unwrap(),
        1
    );
    assert!(persistence.get_donor(scenario.donor.donor_id).is_ok());
}

#[test]
fn test_employee_error_lists_each_referencing_table_once() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);
    let intake = persistence.create_intake(&intake_fields(&scenario)).unwrap();
    persistence.create_intake(&intake_fields(&scenario)).unwrap();
    persistence
        .create_processing(&ProcessingFields {
            intake_id: intake.intake_id,
            employee_id: scenario.employee.employee_id,
            started_at: datetime!(2026-03-02 09:00:00),
            ended_at: None,
            process_type: String::from("Baling"),
            resulting_quantity_kg: dec("118.00"),
            byproducts: String::new(),
            processing_cost: dec("12.00"),
        })
        .unwrap();
    persistence.create_sale(&sale_fields(&scenario)).unwrap();

    let err = persistence
        .delete_employee(scenario.employee.employee_id)
        .unwrap_err();

    assert_eq!(
        err,
        PersistenceError::Referenced {
            entity: EntityKind::RecyclingEmployee,
            id: scenario.employee.employee_id,
            dependents: vec!["material_intakes", "material_processings", "material_sales"],
        }
    );
}

#[test]
fn test_intake_with_processing_cannot_be_deleted() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);
    let intake = persistence.create_intake(&intake_fields(&scenario)).unwrap();
    let processing = persistence
        .create_processing(&ProcessingFields {
            intake_id: intake.intake_id,
            employee_id: scenario.employee.employee_id,
            started_at: datetime!(2026-03-02 09:00:00),
            ended_at: Some(datetime!(2026-03-02 10:00:00)),
            process_type: String::from("Sorting"),
            resulting_quantity_kg: dec("119.00"),
            byproducts: String::new(),
            processing_cost: dec("5.00"),
        })
        .unwrap();

    let err = persistence.delete_intake(intake.intake_id).unwrap_err();
    assert_eq!(
        err,
        PersistenceError::Referenced {
            entity: EntityKind::MaterialIntake,
            id: intake.intake_id,
            dependents: vec!["material_processings"],
        }
    );

    persistence
        .delete_processing(processing.processing_id)
        .unwrap();
    persistence.delete_intake(intake.intake_id).unwrap();
    assert_eq!(persistence.count_rows(EntityKind::MaterialIntake).unwrap(), 0);
}

#[test]
fn test_material_sold_but_never_received_is_protected() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);
    persistence.create_sale(&sale_fields(&scenario)).unwrap();

    let err = persistence
        .delete_material(scenario.material.material_id)
        .unwrap_err();

    assert_eq!(
        err,
        PersistenceError::Referenced {
            entity: EntityKind::RecyclableMaterial,
            id: scenario.material.material_id,
            dependents: vec!["material_sales"],
        }
    );
}

#[test]
fn test_deleting_dependents_first_frees_everything() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);
    let intake = persistence.create_intake(&intake_fields(&scenario)).unwrap();
    let sale = persistence.create_sale(&sale_fields(&scenario)).unwrap();

    persistence.delete_sale(sale.sale_id).unwrap();
    persistence.delete_intake(intake.intake_id).unwrap();
    persistence
        .delete_material(scenario.material.material_id)
        .unwrap();
    persistence.delete_center(scenario.center.center_id).unwrap();
    persistence.delete_donor(scenario.donor.donor_id).unwrap();
    persistence
        .delete_employee(scenario.employee.employee_id)
        .unwrap();

    for kind in EntityKind::ALL {
        assert_eq!(persistence.count_rows(kind).unwrap(), 0, "{kind} should be empty");
    }
}

#[test]
fn test_deleting_missing_record_is_not_found() {
    let mut persistence = create_test_persistence();

    let err = persistence.delete_intake(404).unwrap_err();

    assert_eq!(
        err,
        PersistenceError::NotFound {
            entity: EntityKind::MaterialIntake,
            id: 404,
        }
    );
}
