//! HTTP middleware stack: bearer-token extractors, CORS and request tracing.

pub mod auth;
pub mod cors;
pub mod trace;

pub use auth::{AdminUser, AuthUser, MaybeUser};
