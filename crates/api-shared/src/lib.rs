//! # API Shared
//!
//! Shared utilities and definitions for ImplantX APIs.
//!
//! Contains:
//! - Request/response types with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//! - API-key authentication
//!
//! Used by `api-rest` and the run binary.

pub mod auth;
pub mod dto;
pub mod health;

pub use auth::AuthError;
pub use dto::*;
pub use health::HealthService;
