// ==========================================
// Aid Registry - per-entity record assembly
// ==========================================
// Column checks live in importer::schema; each validator here only
// turns a checked row into its entity record.
// ==========================================

pub mod aid;
pub mod damage;
pub mod guardian;
pub mod injured;

pub use aid::AidValidator;
pub use damage::DamageValidator;
pub use guardian::GuardianValidator;
pub use injured::InjuredValidator;
