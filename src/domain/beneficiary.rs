// ==========================================
// Aid Registry - beneficiary domain model
// ==========================================
// Entity records produced by the importer. Ids and timestamps are
// assigned by the store, never by the import core.
// Red line: national ids are opaque strings (leading zeros preserved)
// ==========================================

use crate::domain::types::{DamageType, Gender, InjuryType, ResidenceStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Area - geographic partition
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: String,
    pub name: String,
}

impl Area {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// ==========================================
// Guardian - head of household
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    pub name: String,
    pub national_id: String,
    pub phone: String,
    pub gender: Gender,
    pub wives_count: u32,
    pub children_count: u32,
    pub family_members_count: u32, // derived: children + wives + 1
    pub residence_status: ResidenceStatus,
    pub area_id: String,
    pub address: String,
}

// ==========================================
// Aid - one disbursement
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aid {
    pub guardian_national_id: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub area_id: Option<String>,
    pub area_name: String,
    pub aid_type: String,
    pub aid_date: NaiveDate,
    pub notes: String,
    /// false when the national id was not found in the lookup table
    pub guardian_registered: bool,
}

// ==========================================
// Damage - property damage of a registered guardian
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Damage {
    pub guardian_national_id: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub area_id: String,
    pub damage_type: DamageType,
    pub notes: String,
}

// ==========================================
// Injured - injured person
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Injured {
    pub name: String,
    pub national_id: String,
    pub phone: String,
    pub injury_date: NaiveDate,
    pub injury_type: InjuryType,
    pub area_id: Option<String>,
    pub notes: String,
}

// ==========================================
// LookupTable - read-only reference data
// ==========================================
// Guardians indexed by national id plus the known areas.
// Validators only read it.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    guardians: Vec<Guardian>,
    areas: Vec<Area>,
    by_national_id: HashMap<String, usize>,
}

impl LookupTable {
    pub fn new(guardians: Vec<Guardian>, areas: Vec<Area>) -> Self {
        let mut by_national_id = HashMap::with_capacity(guardians.len());
        for (idx, guardian) in guardians.iter().enumerate() {
            // first registration wins, like a linear scan would
            by_national_id
                .entry(guardian.national_id.clone())
                .or_insert(idx);
        }

        Self {
            guardians,
            areas,
            by_national_id,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Exact string match on national id
    pub fn find_guardian(&self, national_id: &str) -> Option<&Guardian> {
        self.by_national_id
            .get(national_id)
            .and_then(|idx| self.guardians.get(*idx))
    }

    /// Exact match on area name
    pub fn find_area_by_name(&self, name: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.name == name)
    }

    pub fn find_area(&self, id: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.id == id)
    }

    /// Area name for an id, empty when unknown
    pub fn area_name(&self, id: &str) -> &str {
        self.find_area(id).map(|a| a.name.as_str()).unwrap_or("")
    }

    pub fn first_area(&self) -> Option<&Area> {
        self.areas.first()
    }

    pub fn guardians(&self) -> &[Guardian] {
        &self.guardians
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }
}
