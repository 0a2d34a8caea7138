// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use recycling_center_domain::{
    EmployeeFields, EntityKind, IntakeFields, MaterialIntake, format_timestamp, now_utc,
};

use crate::tests::{ana_ruiz, create_test_persistence, dec, intake_fields, seed_scenario};
use crate::{ErrorKind, IntakeFilter, PersistenceError};

#[test]
fn test_scenario_intake_gets_id_and_store_set_timestamp() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);
    let before = now_utc().replace_nanosecond(0).unwrap();

    let intake: MaterialIntake = persistence.create_intake(&intake_fields(&scenario)).unwrap();

    let after = now_utc();
    assert!(intake.intake_id > 0);
    assert!(intake.received_at >= before && intake.received_at <= after);
    assert_eq!(intake.quantity_kg, dec("120.50"));
    assert_eq!(intake.material_id, scenario.material.material_id);
    assert_eq!(intake.receiver_id, scenario.employee.employee_id);
    assert_eq!(persistence.get_intake(intake.intake_id).unwrap(), intake);
}

#[test]
fn test_intake_label_shows_minutes() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);
    let intake = persistence.create_intake(&intake_fields(&scenario)).unwrap();

    let label: String = persistence
        .label(EntityKind::MaterialIntake, intake.intake_id)
        .unwrap();

    let stamp: String = format_timestamp(intake.received_at).unwrap();
    assert_eq!(label, format!("Intake {} - {}", intake.intake_id, &stamp[..16]));
}

#[test]
fn test_intake_with_nonexistent_donor_names_the_field() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);

    let err = persistence
        .create_intake(&IntakeFields {
            donor_id: 4242,
            ..intake_fields(&scenario)
        })
        .unwrap_err();

    assert_eq!(
        err,
        PersistenceError::MissingReference {
            entity: EntityKind::Donor,
            field: "donor_id",
            id: 4242,
        }
    );
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.field(), Some("donor_id"));
    assert_eq!(persistence.count_rows(EntityKind::MaterialIntake).unwrap(), 0);
}

#[test]
fn test_intake_with_nonexistent_receiver_is_rejected() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);

    let err = persistence
        .create_intake(&IntakeFields {
            receiver_id: 77,
            ..intake_fields(&scenario)
        })
        .unwrap_err();

    assert_eq!(err.field(), Some("receiver_id"));
}

#[test]
fn test_intake_requires_condition() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);

    let err = persistence
        .create_intake(&IntakeFields {
            material_condition: String::new(),
            ..intake_fields(&scenario)
        })
        .unwrap_err();

    assert_eq!(err.field(), Some("material_condition"));
}

#[test]
fn test_intake_quantity_precision_is_enforced() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);

    let err = persistence
        .create_intake(&IntakeFields {
            quantity_kg: dec("100000000.00"),
            ..intake_fields(&scenario)
        })
        .unwrap_err();

    assert_eq!(err.field(), Some("quantity_kg"));
}

#[test]
fn test_update_intake_keeps_received_at() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);
    let intake = persistence.create_intake(&intake_fields(&scenario)).unwrap();

    let updated = persistence
        .update_intake(
            intake.intake_id,
            &IntakeFields {
                quantity_kg: dec("98.75"),
                notes: String::from("Reweighed after sorting"),
                ..intake_fields(&scenario)
            },
        )
        .unwrap();

    assert_eq!(updated.quantity_kg, dec("98.75"));
    assert_eq!(updated.notes, "Reweighed after sorting");
    assert_eq!(updated.received_at, intake.received_at);
}

#[test]
fn test_update_intake_rejects_nonexistent_center() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);
    let intake = persistence.create_intake(&intake_fields(&scenario)).unwrap();

    let err = persistence
        .update_intake(
            intake.intake_id,
            &IntakeFields {
                center_id: 999,
                ..intake_fields(&scenario)
            },
        )
        .unwrap_err();

    assert_eq!(err.field(), Some("center_id"));
    assert_eq!(
        persistence.get_intake(intake.intake_id).unwrap().center_id,
        scenario.center.center_id
    );
}

#[test]
fn test_list_intakes_filters_by_reverse_relation() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);
    let other_receiver = persistence
        .create_employee(&EmployeeFields {
            first_name: String::from("Luis"),
            last_name: String::from("Gomez"),
            national_id: String::from("87654321"),
            ..ana_ruiz()
        })
        .unwrap();

    let first = persistence.create_intake(&intake_fields(&scenario)).unwrap();
    let second = persistence
        .create_intake(&IntakeFields {
            receiver_id: other_receiver.employee_id,
            ..intake_fields(&scenario)
        })
        .unwrap();

    let all = persistence.list_intakes(IntakeFilter::default()).unwrap();
    assert_eq!(all, vec![first.clone(), second.clone()]);

    let received_by_luis = persistence
        .list_intakes(IntakeFilter {
            receiver_id: Some(other_receiver.employee_id),
            ..IntakeFilter::default()
        })
        .unwrap();
    assert_eq!(received_by_luis, vec![second]);

    let from_acme = persistence
        .list_intakes(IntakeFilter {
            donor_id: Some(scenario.donor.donor_id),
            material_id: Some(scenario.material.material_id),
            ..IntakeFilter::default()
        })
        .unwrap();
    assert_eq!(from_acme.len(), 2);

    let none = persistence
        .list_intakes(IntakeFilter {
            center_id: Some(scenario.center.center_id + 100),
            ..IntakeFilter::default()
        })
        .unwrap();
    assert!(none.is_empty());
    assert_eq!(first.intake_id + 1, all[1].intake_id);
}
