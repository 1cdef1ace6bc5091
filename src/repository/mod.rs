// ==========================================
// Aid Registry - repository layer
// ==========================================
// Red line: no business rules, CRUD only
// Constraint: parameterized queries only
// ==========================================

pub mod beneficiary_repo;
pub mod beneficiary_repo_impl;
pub mod error;

pub use beneficiary_repo::{BeneficiaryRepository, StoredRecord};
pub use beneficiary_repo_impl::BeneficiaryRepositoryImpl;
pub use error::{RepositoryError, RepositoryResult};
