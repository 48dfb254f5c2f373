//! HTTP handlers module

pub mod auth;
pub mod health;
