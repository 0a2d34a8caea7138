// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod catalog_tests;
mod delete_protection_tests;
mod intake_tests;
mod processing_tests;

use recycling_center_domain::{
    CenterFields, CollectionCenter, Decimal, Donor, DonorFields, EmployeeFields, IntakeFields,
    MaterialFields, RecyclableMaterial, RecyclingEmployee, SaleFields,
};
use time::macros::date;

use crate::Persistence;

/// Parses a decimal literal.
pub fn dec(value: &str) -> Decimal {
    value.parse().expect("valid decimal literal")
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

pub fn pet_plastic() -> MaterialFields {
    MaterialFields {
        name: String::from("PET Plastic"),
        description: String::from("Clear beverage bottles"),
        category: String::from("Plastic"),
        price_per_kg: dec("1.50"),
        unit_of_measure: String::from("kg"),
        is_toxic: false,
        recommended_drop_off: String::from("Yellow bin"),
        identification_code: String::from("MAT-001"),
    }
}

pub fn north_depot() -> CenterFields {
    CenterFields {
        name: String::from("North Depot"),
        address: String::from("1200 Industrial Ave"),
        phone: String::from("555-0100"),
        email: String::from("north@depot.example"),
        opening_hours: String::from("Mon-Fri 08:00-17:00"),
        capacity_tonnes: dec("500.00"),
        latitude: Some(dec("-34.603722")),
        longitude: Some(dec("-58.381592")),
    }
}

pub fn acme_corp() -> DonorFields {
    DonorFields {
        name: String::from("Acme Corp"),
        donor_type: String::from("Company"),
        tax_id: String::from("20123456789"),
        is_anonymous: false,
        ..DonorFields::default()
    }
}

pub fn ana_ruiz() -> EmployeeFields {
    EmployeeFields {
        first_name: String::from("Ana"),
        last_name: String::from("Ruiz"),
        national_id: String::from("12345678"),
        hire_date: date!(2024 - 03 - 01),
        role: String::from("Receiver"),
        shift: String::from("Morning"),
        phone: String::new(),
        email: String::from("ana.ruiz@depot.example"),
        certifications: String::new(),
    }
}

/// The four leaf records every operation test needs.
pub struct Scenario {
    pub material: RecyclableMaterial,
    pub center: CollectionCenter,
    pub donor: Donor,
    pub employee: RecyclingEmployee,
}

pub fn seed_scenario(persistence: &mut Persistence) -> Scenario {
    Scenario {
        material: persistence.create_material(&pet_plastic()).unwrap(),
        center: persistence.create_center(&north_depot()).unwrap(),
        donor: persistence.create_donor(&acme_corp()).unwrap(),
        employee: persistence.create_employee(&ana_ruiz()).unwrap(),
    }
}

pub fn intake_fields(scenario: &Scenario) -> IntakeFields {
    IntakeFields {
        material_id: scenario.material.material_id,
        center_id: scenario.center.center_id,
        donor_id: scenario.donor.donor_id,
        receiver_id: scenario.employee.employee_id,
        quantity_kg: dec("120.50"),
        material_condition: String::from("Clean"),
        notes: String::new(),
    }
}

pub fn sale_fields(scenario: &Scenario) -> SaleFields {
    SaleFields {
        material_id: scenario.material.material_id,
        seller_id: scenario.employee.employee_id,
        buyer_id: 9999,
        quantity_sold_kg: dec("80.00"),
        unit_price: dec("1.50"),
        total_amount: dec("120.00"),
        payment_method: String::from("Transfer"),
    }
}
