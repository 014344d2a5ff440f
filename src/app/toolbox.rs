// icon-tool - app/toolbox.rs
//
// Run-wide tool state: the executable cache and the two selected backends.
//
// A `Toolbox` is created once per process run and passed to every
// operation. Each backend is probed on first use and then reused for the
// rest of the run, even if the environment changes underneath. `reset`
// forgets all of it so a different environment can be probed.

use crate::app::converter::SvgConverter;
use crate::app::ico::IcoAssembler;
use crate::platform::tools::{ExeResolver, ToolEnv};
use crate::util::error::ToolError;
use once_cell::unsync::OnceCell;

#[derive(Debug)]
pub struct Toolbox {
    resolver: ExeResolver,
    converter: OnceCell<SvgConverter>,
    assembler: OnceCell<IcoAssembler>,
}

impl Toolbox {
    pub fn new(env: ToolEnv) -> Self {
        tracing::debug!(env = ?env, "Toolbox initialised");
        Self {
            resolver: ExeResolver::new(env),
            converter: OnceCell::new(),
            assembler: OnceCell::new(),
        }
    }

    pub fn resolver(&self) -> &ExeResolver {
        &self.resolver
    }

    /// The SVG converter for this run, probing on first call.
    pub fn converter(&self) -> Result<&SvgConverter, ToolError> {
        self.converter
            .get_or_try_init(|| SvgConverter::probe(&self.resolver))
    }

    /// The ICO assembler for this run, probing on first call.
    pub fn assembler(&self) -> Result<&IcoAssembler, ToolError> {
        self.assembler
            .get_or_try_init(|| IcoAssembler::probe(&self.resolver))
    }

    /// Drop both selected backends and every cached executable path.
    pub fn reset(&mut self) {
        tracing::debug!("Toolbox reset");
        self.converter.take();
        self.assembler.take();
        self.resolver.clear();
    }
}
