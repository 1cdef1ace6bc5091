// ==========================================
// Aid Registry - API layer
// ==========================================
// Responsibility: facade for the UI (import, templates, exports, reports)
// ==========================================

pub mod error;
pub mod import_api;

pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse};
