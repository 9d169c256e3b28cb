//! Request / response types for the `/api/ai` endpoints.
//!
//! Field names are camelCase on the wire to match the existing web client.

pub mod assist;
pub mod chat;
pub mod generate;
pub mod stats;
