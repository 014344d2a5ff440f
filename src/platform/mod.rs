// icon-tool - platform/mod.rs
//
// Platform abstraction layer: config files, process execution, executable
// lookup.
// Must NOT depend on: app.

pub mod config;
pub mod exec;
pub mod tools;
