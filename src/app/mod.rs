// RoboSched - app/mod.rs
//
// Application layer: console state, schedule loading, mock data, storage.
// Dependencies: core layer.
// Must NOT depend on: platform specifics.

pub mod mock;
pub mod repository;
pub mod schedule_store;
pub mod state;
