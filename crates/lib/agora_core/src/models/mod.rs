//! Domain models.
//!
//! These are internal domain models, distinct from the request/response
//! shapes in `agora_api::models`.

pub mod auth;
pub mod chat;
pub mod forum;
