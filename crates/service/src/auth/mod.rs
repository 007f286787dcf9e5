//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Admin accounts with Argon2-hashed passwords and HS256 bearer tokens.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
