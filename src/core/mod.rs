// icon-tool - core/mod.rs
//
// Core layer: data model, version parsing, icon catalog.
// Must NOT depend on: app or platform. Never spawns processes.

pub mod catalog;
pub mod model;
pub mod version;
