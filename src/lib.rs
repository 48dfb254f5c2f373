//! Specimen registry backend library
//! Authentication core plus the shared service plumbing around it

pub mod auth;
pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;
