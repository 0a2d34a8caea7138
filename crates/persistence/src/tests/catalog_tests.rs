// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use recycling_center_domain::{
    CenterFields, DomainError, EntityKind, MaterialFields, RecyclableMaterial,
};

use crate::tests::{create_test_persistence, dec, north_depot, pet_plastic};
use crate::{ErrorKind, PersistenceError};

#[test]
fn test_create_material_assigns_id_and_round_trips_fields() {
    let mut persistence = create_test_persistence();

    let material: RecyclableMaterial = persistence.create_material(&pet_plastic()).unwrap();

    assert!(material.material_id > 0);
    assert_eq!(material.name, "PET Plastic");
    assert_eq!(material.price_per_kg, dec("1.50"));
    assert_eq!(material.price_per_kg.scale(), 2);
    assert!(!material.is_toxic);
    assert_eq!(persistence.get_material(material.material_id).unwrap(), material);
}

#[test]
fn test_whole_number_price_is_stored_with_two_decimals() {
    let mut persistence = create_test_persistence();
    let fields = MaterialFields {
        price_per_kg: dec("3"),
        ..pet_plastic()
    };

    let material = persistence.create_material(&fields).unwrap();

    assert_eq!(material.price_per_kg.to_string(), "3.00");
}

#[test]
fn test_duplicate_identification_code_is_rejected() {
    let mut persistence = create_test_persistence();
    persistence.create_material(&pet_plastic()).unwrap();

    let second = MaterialFields {
        name: String::from("PET Flakes"),
        ..pet_plastic()
    };
    let err = persistence.create_material(&second).unwrap_err();

    assert_eq!(
        err,
        PersistenceError::DuplicateValue {
            entity: EntityKind::RecyclableMaterial,
            field: "identification_code",
            value: String::from("MAT-001"),
        }
    );
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.field(), Some("identification_code"));
    assert_eq!(
        persistence
            .count_rows(EntityKind::RecyclableMaterial)
            .unwrap(),
        1
    );
}

#[test]
fn test_price_with_three_decimals_is_rejected() {
    let mut persistence = create_test_persistence();
    let fields = MaterialFields {
        price_per_kg: dec("1.505"),
        ..pet_plastic()
    };

    let err = persistence.create_material(&fields).unwrap_err();

    assert!(matches!(
        err,
        PersistenceError::Validation(DomainError::PrecisionExceeded {
            field: "price_per_kg",
            ..
        })
    ));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_missing_material_name_is_rejected() {
    let mut persistence = create_test_persistence();
    let fields = MaterialFields {
        name: String::from("   "),
        ..pet_plastic()
    };

    let err = persistence.create_material(&fields).unwrap_err();

    assert_eq!(err.field(), Some("name"));
    assert_eq!(
        persistence
            .count_rows(EntityKind::RecyclableMaterial)
            .unwrap(),
        0
    );
}

#[test]
fn test_update_material_keeps_own_identification_code() {
    let mut persistence = create_test_persistence();
    let material = persistence.create_material(&pet_plastic()).unwrap();

    let fields = MaterialFields {
        price_per_kg: dec("1.75"),
        is_toxic: true,
        ..pet_plastic()
    };
    let updated = persistence
        .update_material(material.material_id, &fields)
        .unwrap();

    assert_eq!(updated.material_id, material.material_id);
    assert_eq!(updated.price_per_kg, dec("1.75"));
    assert!(updated.is_toxic);
}

#[test]
fn test_update_material_to_taken_code_is_rejected() {
    let mut persistence = create_test_persistence();
    persistence.create_material(&pet_plastic()).unwrap();
    let glass = persistence
        .create_material(&MaterialFields {
            name: String::from("Green Glass"),
            category: String::from("Glass"),
            identification_code: String::from("MAT-002"),
            ..pet_plastic()
        })
        .unwrap();

    let err = persistence
        .update_material(
            glass.material_id,
            &MaterialFields {
                identification_code: String::from("MAT-001"),
                ..pet_plastic()
            },
        )
        .unwrap_err();

    assert!(matches!(err, PersistenceError::DuplicateValue { .. }));
    assert_eq!(
        persistence
            .get_material(glass.material_id)
            .unwrap()
            .identification_code,
        "MAT-002"
    );
}

#[test]
fn test_missing_material_is_not_found() {
    let mut persistence = create_test_persistence();

    let err = persistence.get_material(42).unwrap_err();
    assert_eq!(
        err,
        PersistenceError::NotFound {
            entity: EntityKind::RecyclableMaterial,
            id: 42,
        }
    );
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = persistence.update_material(42, &pet_plastic()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = persistence.delete_material(42).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_unreferenced_material_can_be_deleted() {
    let mut persistence = create_test_persistence();
    let material = persistence.create_material(&pet_plastic()).unwrap();

    persistence.delete_material(material.material_id).unwrap();

    assert!(persistence.list_materials().unwrap().is_empty());
}

#[test]
fn test_list_materials_is_ordered_by_id() {
    let mut persistence = create_test_persistence();
    for (index, name) in ["Cardboard", "Aluminium", "Copper"].iter().enumerate() {
        persistence
            .create_material(&MaterialFields {
                name: (*name).to_string(),
                identification_code: format!("MAT-10{index}"),
                ..pet_plastic()
            })
            .unwrap();
    }

    let names: Vec<String> = persistence
        .list_materials()
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();

    assert_eq!(names, vec!["Cardboard", "Aluminium", "Copper"]);
}

#[test]
fn test_material_and_center_labels() {
    let mut persistence = create_test_persistence();
    let material = persistence.create_material(&pet_plastic()).unwrap();
    let center = persistence.create_center(&north_depot()).unwrap();

    assert_eq!(
        persistence
            .label(EntityKind::RecyclableMaterial, material.material_id)
            .unwrap(),
        "PET Plastic"
    );
    assert_eq!(
        persistence
            .label(EntityKind::CollectionCenter, center.center_id)
            .unwrap(),
        "North Depot"
    );
}

#[test]
fn test_create_center_round_trips_coordinates() {
    let mut persistence = create_test_persistence();

    let center = persistence.create_center(&north_depot()).unwrap();

    assert_eq!(center.capacity_tonnes, dec("500.00"));
    assert_eq!(center.latitude, Some(dec("-34.603722")));
    assert_eq!(center.longitude, Some(dec("-58.381592")));
}

#[test]
fn test_center_coordinates_are_optional() {
    let mut persistence = create_test_persistence();
    let fields = CenterFields {
        latitude: None,
        longitude: Some(dec("-58.4")),
        ..north_depot()
    };

    let center = persistence.create_center(&fields).unwrap();

    assert_eq!(center.latitude, None);
    assert_eq!(center.longitude, Some(dec("-58.400000")));
}

#[test]
fn test_center_with_malformed_email_is_rejected() {
    let mut persistence = create_test_persistence();
    let fields = CenterFields {
        email: String::from("north-at-depot"),
        ..north_depot()
    };

    let err = persistence.create_center(&fields).unwrap_err();

    assert!(matches!(
        err,
        PersistenceError::Validation(DomainError::InvalidEmail { field: "email", .. })
    ));
}

#[test]
fn test_negative_capacity_is_rejected() {
    let mut persistence = create_test_persistence();
    let fields = CenterFields {
        capacity_tonnes: dec("-1.00"),
        ..north_depot()
    };

    let err = persistence.create_center(&fields).unwrap_err();

    assert_eq!(err.field(), Some("capacity_tonnes"));
}

#[test]
fn test_update_center_replaces_fields() {
    let mut persistence = create_test_persistence();
    let center = persistence.create_center(&north_depot()).unwrap();

    let updated = persistence
        .update_center(
            center.center_id,
            &CenterFields {
                name: String::from("North Depot Annex"),
                capacity_tonnes: dec("750.25"),
                latitude: None,
                longitude: None,
                ..north_depot()
            },
        )
        .unwrap();

    assert_eq!(updated.name, "North Depot Annex");
    assert_eq!(updated.capacity_tonnes, dec("750.25"));
    assert_eq!(updated.latitude, None);
    assert_eq!(persistence.list_centers().unwrap(), vec![updated]);
}
