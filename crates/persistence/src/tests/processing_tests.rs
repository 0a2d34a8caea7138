// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use recycling_center_domain::{
    DomainError, EntityKind, MaterialIntake, ProcessingFields, RecyclingEmployee,
};
use time::macros::datetime;
use time::{Date, Month};

use crate::tests::{create_test_persistence, dec, intake_fields, seed_scenario};
use crate::{ErrorKind, Persistence, PersistenceError, ProcessingFilter};

fn shredding(intake: &MaterialIntake, employee: &RecyclingEmployee) -> ProcessingFields {
    ProcessingFields {
        intake_id: intake.intake_id,
        employee_id: employee.employee_id,
        started_at: datetime!(2026-03-02 09:00:00),
        ended_at: Some(datetime!(2026-03-02 11:30:00)),
        process_type: String::from("Shredding"),
        resulting_quantity_kg: dec("115.00"),
        byproducts: String::from("Labels"),
        processing_cost: dec("42.10"),
    }
}

fn persistence_with_intake() -> (Persistence, MaterialIntake, RecyclingEmployee) {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);
    let intake = persistence.create_intake(&intake_fields(&scenario)).unwrap();
    (persistence, intake, scenario.employee)
}

#[test]
fn test_create_processing_round_trips_timestamps() {
    let (mut persistence, intake, employee) = persistence_with_intake();

    let processing = persistence
        .create_processing(&shredding(&intake, &employee))
        .unwrap();

    assert!(processing.processing_id > 0);
    assert_eq!(processing.started_at, datetime!(2026-03-02 09:00:00));
    assert_eq!(processing.ended_at, Some(datetime!(2026-03-02 11:30:00)));
    assert_eq!(processing.processing_cost, dec("42.10"));
    assert_eq!(
        persistence.get_processing(processing.processing_id).unwrap(),
        processing
    );
}

#[test]
fn test_processing_label_names_its_intake() {
    let (mut persistence, intake, employee) = persistence_with_intake();
    let processing = persistence
        .create_processing(&shredding(&intake, &employee))
        .unwrap();

    assert_eq!(
        persistence
            .label(EntityKind::MaterialProcessing, processing.processing_id)
            .unwrap(),
        format!(
            "Processing {} - Intake: {}",
            processing.processing_id, intake.intake_id
        )
    );
}

#[test]
fn test_processing_still_running_has_no_end() {
    let (mut persistence, intake, employee) = persistence_with_intake();

    let processing = persistence
        .create_processing(&ProcessingFields {
            ended_at: None,
            ..shredding(&intake, &employee)
        })
        .unwrap();

    assert_eq!(processing.ended_at, None);
}

#[test]
fn test_processing_ending_before_start_is_rejected() {
    let (mut persistence, intake, employee) = persistence_with_intake();

    let err = persistence
        .create_processing(&ProcessingFields {
            ended_at: Some(datetime!(2026-03-02 08:59:59)),
            ..shredding(&intake, &employee)
        })
        .unwrap_err();

    assert!(matches!(
        err,
        PersistenceError::Validation(DomainError::EndBeforeStart { .. })
    ));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.field(), Some("ended_at"));
    assert_eq!(
        persistence
            .count_rows(EntityKind::MaterialProcessing)
            .unwrap(),
        0
    );
}

#[test]
fn test_processing_for_missing_intake_is_rejected() {
    let (mut persistence, intake, employee) = persistence_with_intake();

    let err = persistence
        .create_processing(&ProcessingFields {
            intake_id: intake.intake_id + 50,
            ..shredding(&intake, &employee)
        })
        .unwrap_err();

    assert_eq!(
        err,
        PersistenceError::MissingReference {
            entity: EntityKind::MaterialIntake,
            field: "intake_id",
            id: intake.intake_id + 50,
        }
    );
}

#[test]
fn test_processing_by_missing_employee_is_rejected() {
    let (mut persistence, intake, employee) = persistence_with_intake();

    let err = persistence
        .create_processing(&ProcessingFields {
            employee_id: 31337,
            ..shredding(&intake, &employee)
        })
        .unwrap_err();

    assert_eq!(err.field(), Some("employee_id"));
}

#[test]
fn test_update_processing_records_end() {
    let (mut persistence, intake, employee) = persistence_with_intake();
    let processing = persistence
        .create_processing(&ProcessingFields {
            ended_at: None,
            ..shredding(&intake, &employee)
        })
        .unwrap();

    let updated = persistence
        .update_processing(
            processing.processing_id,
            &ProcessingFields {
                ended_at: Some(datetime!(2026-03-02 12:15:00)),
                resulting_quantity_kg: dec("110.25"),
                ..shredding(&intake, &employee)
            },
        )
        .unwrap();

    assert_eq!(updated.ended_at, Some(datetime!(2026-03-02 12:15:00)));
    assert_eq!(updated.resulting_quantity_kg, dec("110.25"));
}

#[test]
fn test_update_missing_processing_is_not_found() {
    let (mut persistence, intake, employee) = persistence_with_intake();

    let err = persistence
        .update_processing(12, &shredding(&intake, &employee))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_list_processings_filters_by_intake() {
    let mut persistence = create_test_persistence();
    let scenario = seed_scenario(&mut persistence);
    let first_intake = persistence.create_intake(&intake_fields(&scenario)).unwrap();
    let second_intake = persistence.create_intake(&intake_fields(&scenario)).unwrap();

    persistence
        .create_processing(&shredding(&first_intake, &scenario.employee))
        .unwrap();
    let washing = persistence
        .create_processing(&ProcessingFields {
            process_type: String::from("Washing"),
            ..shredding(&second_intake, &scenario.employee)
        })
        .unwrap();

    let for_second = persistence
        .list_processings(ProcessingFilter {
            intake_id: Some(second_intake.intake_id),
            ..ProcessingFilter::default()
        })
        .unwrap();
    assert_eq!(for_second, vec![washing]);

    let by_ana = persistence
        .list_processings(ProcessingFilter {
            employee_id: Some(scenario.employee.employee_id),
            ..ProcessingFilter::default()
        })
        .unwrap();
    assert_eq!(by_ana.len(), 2);
}

#[test]
fn test_processing_can_be_deleted() {
    let (mut persistence, intake, employee) = persistence_with_intake();
    let processing = persistence
        .create_processing(&shredding(&intake, &employee))
        .unwrap();

    persistence
        .delete_processing(processing.processing_id)
        .unwrap();

    assert!(
        persistence
            .list_processings(ProcessingFilter::default())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_processing_started_before_year_one_is_rejected_before_writing() {
    let (mut persistence, intake, employee) = persistence_with_intake();
    let started_at = Date::from_calendar_date(-1, Month::December, 31)
        .unwrap()
        .with_hms(23, 0, 0)
        .unwrap();

    let err = persistence
        .create_processing(&ProcessingFields {
            started_at,
            ended_at: None,
            ..shredding(&intake, &employee)
        })
        .unwrap_err();

    assert!(matches!(
        err,
        PersistenceError::Validation(DomainError::YearOutOfRange {
            field: "started_at",
            year: -1
        })
    ));
    assert!(
        persistence
            .list_processings(ProcessingFilter::default())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_processing_ended_in_year_zero_is_rejected() {
    let (mut persistence, intake, employee) = persistence_with_intake();
    let new_year = Date::from_calendar_date(0, Month::January, 1)
        .unwrap()
        .midnight();

    let err = persistence
        .create_processing(&ProcessingFields {
            started_at: new_year,
            ended_at: Some(new_year),
            ..shredding(&intake, &employee)
        })
        .unwrap_err();

    assert_eq!(err.field(), Some("started_at"));
    assert_eq!(persistence.count_rows(EntityKind::MaterialProcessing).unwrap(), 0);
}
