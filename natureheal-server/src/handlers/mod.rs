//! Request orchestration, kept free of HTTP extraction so it can be tested
//! directly against an in-memory store and a scripted model.

pub mod assist;
pub mod chat;
pub mod generation;
