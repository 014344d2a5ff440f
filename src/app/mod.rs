// icon-tool - app/mod.rs
//
// Application layer: backend selection, PNG/ICO generation, batch commands.
// Dependencies: core, platform.

pub mod batch;
pub mod converter;
pub mod ico;
pub mod png;
pub mod toolbox;

#[cfg(test)]
pub(crate) mod testutil;
