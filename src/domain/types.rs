// ==========================================
// Aid Registry - domain type definitions
// ==========================================
// Closed enumerations shared by importer, exporter and repository.
// Arabic labels are the values users type into spreadsheets.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// EntityKind - importable entity
// ==========================================
// Also the persistence key of each collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Guardians,
    Aids,
    Damages,
    Injured,
    Areas,
}

impl EntityKind {
    /// Storage key of the collection
    pub fn storage_key(&self) -> &'static str {
        match self {
            EntityKind::Guardians => "guardians",
            EntityKind::Aids => "aids",
            EntityKind::Damages => "damages",
            EntityKind::Injured => "injured",
            EntityKind::Areas => "areas",
        }
    }

    /// Human readable (Arabic) collection name, used in sheet names
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Guardians => "أولياء الأمور",
            EntityKind::Aids => "المساعدات",
            EntityKind::Damages => "الأضرار",
            EntityKind::Injured => "الجرحى",
            EntityKind::Areas => "المناطق",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}

// ==========================================
// Gender
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Recognised spellings: ذكر/male, أنثى/female. Anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ذكر" | "male" => Some(Gender::Male),
            "أنثى" | "انثى" | "female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "ذكر",
            Gender::Female => "أنثى",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

// ==========================================
// ResidenceStatus
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResidenceStatus {
    Resident,
    Displaced,
}

impl ResidenceStatus {
    /// نازح/displaced → Displaced, everything else → Resident
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "نازح" | "displaced" => ResidenceStatus::Displaced,
            _ => ResidenceStatus::Resident,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResidenceStatus::Resident => "مقيم",
            ResidenceStatus::Displaced => "نازح",
        }
    }
}

// ==========================================
// DamageType - closed set {كلي, جزئي}
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageType {
    #[serde(rename = "كلي")]
    Total,
    #[serde(rename = "جزئي")]
    Partial,
}

impl DamageType {
    pub const LABELS: &'static [&'static str] = &["كلي", "جزئي"];

    /// Exact match only
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "كلي" => Some(DamageType::Total),
            "جزئي" => Some(DamageType::Partial),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DamageType::Total => "كلي",
            DamageType::Partial => "جزئي",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// InjuryType - closed set of 12 categories
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjuryType {
    #[serde(rename = "بتر")]
    Amputation,
    #[serde(rename = "كسور")]
    Fractures,
    #[serde(rename = "حروق")]
    Burns,
    #[serde(rename = "إصابة في الرأس")]
    Head,
    #[serde(rename = "إصابة في العين")]
    Eye,
    #[serde(rename = "إصابة في العمود الفقري")]
    Spinal,
    #[serde(rename = "شلل")]
    Paralysis,
    #[serde(rename = "جروح")]
    Wounds,
    #[serde(rename = "شظايا")]
    Shrapnel,
    #[serde(rename = "إصابة في الصدر")]
    Chest,
    #[serde(rename = "إصابة في البطن")]
    Abdominal,
    #[serde(rename = "أخرى")]
    Other,
}

impl InjuryType {
    pub const ALL: [InjuryType; 12] = [
        InjuryType::Amputation,
        InjuryType::Fractures,
        InjuryType::Burns,
        InjuryType::Head,
        InjuryType::Eye,
        InjuryType::Spinal,
        InjuryType::Paralysis,
        InjuryType::Wounds,
        InjuryType::Shrapnel,
        InjuryType::Chest,
        InjuryType::Abdominal,
        InjuryType::Other,
    ];

    pub const LABELS: &'static [&'static str] = &[
        "بتر",
        "كسور",
        "حروق",
        "إصابة في الرأس",
        "إصابة في العين",
        "إصابة في العمود الفقري",
        "شلل",
        "جروح",
        "شظايا",
        "إصابة في الصدر",
        "إصابة في البطن",
        "أخرى",
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.label() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            InjuryType::Amputation => "بتر",
            InjuryType::Fractures => "كسور",
            InjuryType::Burns => "حروق",
            InjuryType::Head => "إصابة في الرأس",
            InjuryType::Eye => "إصابة في العين",
            InjuryType::Spinal => "إصابة في العمود الفقري",
            InjuryType::Paralysis => "شلل",
            InjuryType::Wounds => "جروح",
            InjuryType::Shrapnel => "شظايا",
            InjuryType::Chest => "إصابة في الصدر",
            InjuryType::Abdominal => "إصابة في البطن",
            InjuryType::Other => "أخرى",
        }
    }
}

impl fmt::Display for InjuryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// IssueLevel - row-level issue severity
// ==========================================
// Error: row excluded. Warning: row imported, flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueLevel {
    Error,
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("ذكر"), Some(Gender::Male));
        assert_eq!(Gender::parse(" Female "), Some(Gender::Female));
        assert_eq!(Gender::parse("أنثى"), Some(Gender::Female));
        assert_eq!(Gender::parse("unknown"), None);
    }

    #[test]
    fn test_residence_status_defaults_to_resident() {
        assert_eq!(ResidenceStatus::parse("نازح"), ResidenceStatus::Displaced);
        assert_eq!(ResidenceStatus::parse("displaced"), ResidenceStatus::Displaced);
        assert_eq!(ResidenceStatus::parse("مقيم"), ResidenceStatus::Resident);
        assert_eq!(ResidenceStatus::parse(""), ResidenceStatus::Resident);
    }

    #[test]
    fn test_damage_type_exact_match() {
        assert_eq!(DamageType::parse("كلي"), Some(DamageType::Total));
        assert_eq!(DamageType::parse("جزئي"), Some(DamageType::Partial));
        assert_eq!(DamageType::parse("متوسط"), None);
    }

    #[test]
    fn test_injury_type_labels_cover_all_variants() {
        assert_eq!(InjuryType::ALL.len(), InjuryType::LABELS.len());
        for (t, label) in InjuryType::ALL.iter().zip(InjuryType::LABELS) {
            assert_eq!(t.label(), *label);
            assert_eq!(InjuryType::parse(label), Some(*t));
        }
    }

    #[test]
    fn test_damage_type_serializes_as_label() {
        let json = serde_json::to_string(&DamageType::Total).unwrap();
        assert_eq!(json, "\"كلي\"");
    }
}
