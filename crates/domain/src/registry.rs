// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Explicit schema registry.
//!
//! The registry describes which entities exist, which table backs each one,
//! and which foreign-key relations connect them. It is built once and handed
//! to the persistence adapter, which uses it to verify the migrated schema and
//! to decide which dependent rows block a delete.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// The kinds of record stored by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    RecyclableMaterial,
    CollectionCenter,
    Donor,
    RecyclingEmployee,
    MaterialIntake,
    MaterialProcessing,
    MaterialSale,
}

impl EntityKind {
    /// Every entity kind, leaves first.
    pub const ALL: [Self; 7] = [
        Self::RecyclableMaterial,
        Self::CollectionCenter,
        Self::Donor,
        Self::RecyclingEmployee,
        Self::MaterialIntake,
        Self::MaterialProcessing,
        Self::MaterialSale,
    ];

    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RecyclableMaterial => "RecyclableMaterial",
            Self::CollectionCenter => "CollectionCenter",
            Self::Donor => "Donor",
            Self::RecyclingEmployee => "RecyclingEmployee",
            Self::MaterialIntake => "MaterialIntake",
            Self::MaterialProcessing => "MaterialProcessing",
            Self::MaterialSale => "MaterialSale",
        }
    }

    /// The table that stores this kind.
    #[must_use]
    pub const fn table_name(&self) -> &'static str {
        match self {
            Self::RecyclableMaterial => "recyclable_materials",
            Self::CollectionCenter => "collection_centers",
            Self::Donor => "donors",
            Self::RecyclingEmployee => "recycling_employees",
            Self::MaterialIntake => "material_intakes",
            Self::MaterialProcessing => "material_processings",
            Self::MaterialSale => "material_sales",
        }
    }

    /// The primary key column of this kind's table.
    #[must_use]
    pub const fn primary_key(&self) -> &'static str {
        match self {
            Self::RecyclableMaterial => "material_id",
            Self::CollectionCenter => "center_id",
            Self::Donor => "donor_id",
            Self::RecyclingEmployee => "employee_id",
            Self::MaterialIntake => "intake_id",
            Self::MaterialProcessing => "processing_id",
            Self::MaterialSale => "sale_id",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.table_name() == s)
            .ok_or_else(|| DomainError::UnknownEntity(s.to_string()))
    }
}

/// A foreign-key relation from one entity to another.
///
/// Every relation is `ON DELETE RESTRICT`: the target cannot be deleted while
/// any source row points at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    IntakeMaterial,
    IntakeCenter,
    IntakeDonor,
    IntakeReceiver,
    ProcessingIntake,
    ProcessingEmployee,
    SaleMaterial,
    SaleSeller,
}

impl Relation {
    /// Every relation in the recycling center schema.
    pub const ALL: [Self; 8] = [
        Self::IntakeMaterial,
        Self::IntakeCenter,
        Self::IntakeDonor,
        Self::IntakeReceiver,
        Self::ProcessingIntake,
        Self::ProcessingEmployee,
        Self::SaleMaterial,
        Self::SaleSeller,
    ];

    /// The entity holding the foreign-key column.
    #[must_use]
    pub const fn source(&self) -> EntityKind {
        match self {
            Self::IntakeMaterial
            | Self::IntakeCenter
            | Self::IntakeDonor
            | Self::IntakeReceiver => EntityKind::MaterialIntake,
            Self::ProcessingIntake | Self::ProcessingEmployee => EntityKind::MaterialProcessing,
            Self::SaleMaterial | Self::SaleSeller => EntityKind::MaterialSale,
        }
    }

    /// The entity the foreign key points at.
    #[must_use]
    pub const fn target(&self) -> EntityKind {
        match self {
            Self::IntakeMaterial | Self::SaleMaterial => EntityKind::RecyclableMaterial,
            Self::IntakeCenter => EntityKind::CollectionCenter,
            Self::IntakeDonor => EntityKind::Donor,
            Self::IntakeReceiver | Self::ProcessingEmployee | Self::SaleSeller => {
                EntityKind::RecyclingEmployee
            }
            Self::ProcessingIntake => EntityKind::MaterialIntake,
        }
    }

    /// The foreign-key column on the source table.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::IntakeMaterial | Self::SaleMaterial => "material_id",
            Self::IntakeCenter => "center_id",
            Self::IntakeDonor => "donor_id",
            Self::IntakeReceiver => "receiver_id",
            Self::ProcessingIntake => "intake_id",
            Self::ProcessingEmployee => "employee_id",
            Self::SaleSeller => "seller_id",
        }
    }

    /// The name of the reverse collection on the target, e.g. a material's `intakes`.
    #[must_use]
    pub const fn related_name(&self) -> &'static str {
        match self {
            Self::IntakeMaterial | Self::IntakeCenter | Self::IntakeDonor => "intakes",
            Self::IntakeReceiver => "intakes_received",
            Self::ProcessingIntake => "processings",
            Self::ProcessingEmployee => "processings_performed",
            Self::SaleMaterial => "sales",
            Self::SaleSeller => "sales_made",
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} -> {}",
            self.source().table_name(),
            self.column(),
            self.target().table_name()
        )
    }
}

/// Registration of a single entity.
///
/// The table and primary key come from the kind, so a registration always
/// names the tables the queries write to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub kind: EntityKind,
    /// Columns with a uniqueness constraint.
    pub unique_columns: Vec<String>,
    /// Outgoing foreign keys.
    pub relations: Vec<Relation>,
}

impl EntitySchema {
    /// Creates a schema entry with no unique columns or relations.
    #[must_use]
    pub const fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            unique_columns: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// The table holding this entity's rows.
    #[must_use]
    pub const fn table(&self) -> &'static str {
        self.kind.table_name()
    }

    #[must_use]
    pub const fn primary_key(&self) -> &'static str {
        self.kind.primary_key()
    }

    /// Adds a unique column.
    #[must_use]
    pub fn unique(mut self, column: &str) -> Self {
        self.unique_columns.push(column.to_string());
        self
    }

    /// Adds an outgoing relation.
    #[must_use]
    pub fn relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }
}

/// The set of entities and relations known to a persistence adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRegistry {
    entities: Vec<EntitySchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// The registry for the full recycling center schema.
    #[must_use]
    pub fn recycling_center() -> Self {
        let mut registry: Self = Self::new();
        registry
            .register(
                EntitySchema::new(EntityKind::RecyclableMaterial).unique("identification_code"),
            )
            .register(EntitySchema::new(EntityKind::CollectionCenter))
            .register(EntitySchema::new(EntityKind::Donor))
            .register(EntitySchema::new(EntityKind::RecyclingEmployee).unique("national_id"))
            .register(
                EntitySchema::new(EntityKind::MaterialIntake)
                    .relation(Relation::IntakeMaterial)
                    .relation(Relation::IntakeCenter)
                    .relation(Relation::IntakeDonor)
                    .relation(Relation::IntakeReceiver),
            )
            .register(
                EntitySchema::new(EntityKind::MaterialProcessing)
                    .relation(Relation::ProcessingIntake)
                    .relation(Relation::ProcessingEmployee),
            )
            .register(
                EntitySchema::new(EntityKind::MaterialSale)
                    .relation(Relation::SaleMaterial)
                    .relation(Relation::SaleSeller),
            );
        registry
    }

    /// Registers an entity, replacing any earlier entry of the same kind.
    pub fn register(&mut self, schema: EntitySchema) -> &mut Self {
        if let Some(existing) = self.entities.iter_mut().find(|e| e.kind == schema.kind) {
            *existing = schema;
        } else {
            self.entities.push(schema);
        }
        self
    }

    /// Looks up the registration for `kind`.
    #[must_use]
    pub fn entity(&self, kind: EntityKind) -> Option<&EntitySchema> {
        self.entities.iter().find(|e| e.kind == kind)
    }

    /// All registered entities, in registration order.
    #[must_use]
    pub fn entities(&self) -> &[EntitySchema] {
        &self.entities
    }

    /// All registered relations.
    pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
        self.entities.iter().flat_map(|e| e.relations.iter().copied())
    }

    /// Relations whose target is `kind`. Rows on the source side of any of
    /// these block deletion of a `kind` row.
    #[must_use]
    pub fn dependents_of(&self, kind: EntityKind) -> Vec<Relation> {
        self.relations().filter(|r| r.target() == kind).collect()
    }

    /// Returns the registered entities ordered so that every entity comes
    /// after everything it references.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A relation targets an entity that is not registered
    /// - The relations form a cycle
    pub fn dependency_order(&self) -> Result<Vec<EntityKind>, DomainError> {
        for relation in self.relations() {
            if self.entity(relation.target()).is_none() {
                return Err(DomainError::UnknownEntity(
                    relation.target().as_str().to_string(),
                ));
            }
        }

        let mut ordered: Vec<EntityKind> = Vec::with_capacity(self.entities.len());
        let mut remaining: Vec<&EntitySchema> = self.entities.iter().collect();

        while !remaining.is_empty() {
            let (ready, blocked): (Vec<&EntitySchema>, Vec<&EntitySchema>) =
                remaining.into_iter().partition(|schema| {
                    schema
                        .relations
                        .iter()
                        .all(|r| ordered.contains(&r.target()))
                });

            if ready.is_empty() {
                let stuck: &str = blocked.first().map_or("", |s| s.table());
                return Err(DomainError::CyclicDependency(stuck.to_string()));
            }

            ordered.extend(ready.iter().map(|s| s.kind));
            remaining = blocked;
        }

        Ok(ordered)
    }
}
