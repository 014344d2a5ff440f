// icon-tool - lib.rs
//
// Library entry point, exposing all modules for integration testing.
// The CLI wiring lives in `main.rs`.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
