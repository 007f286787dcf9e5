//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod content;
pub mod leads;
pub mod media;
pub mod backup;
pub mod seed;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
