// RoboSched - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: platform, app, or the filesystem.

pub mod cleaning;
pub mod export;
pub mod labels;
pub mod model;
pub mod query;
pub mod schedule;
pub mod user;
pub mod validation;
