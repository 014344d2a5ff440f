// icon-tool - app/png.rs
//
// Single PNG generation: resolve the SVG source, rasterise it with the
// run's converter, then optimise the result in place with optipng.

use crate::app::toolbox::Toolbox;
use crate::core::catalog::IconCatalog;
use crate::core::model::SizePixels;
use crate::platform::exec;
use crate::util::constants;
use crate::util::error::Result;
use std::ffi::OsStr;
use std::path::Path;

/// Render `icon_name` at `size` into `output`.
///
/// The source is resolved before any tool is looked up or run, so a missing
/// generic SVG fails without touching `output`.
pub fn generate_png(
    toolbox: &Toolbox,
    catalog: &IconCatalog,
    icon_name: &str,
    output: &Path,
    size: SizePixels,
) -> Result<()> {
    let svg = catalog.svg_source(icon_name, size)?;
    let converter = toolbox.converter()?;
    let optipng = toolbox.resolver().require(constants::OPTIPNG_EXE)?;

    converter.convert(&svg, output, size)?;
    exec::run(&mut exec::command(
        &optipng,
        [OsStr::new("-quiet"), output.as_os_str()],
    ))?;

    tracing::info!(
        icon = icon_name,
        size,
        svg = %svg.display(),
        png = %output.display(),
        "Generated PNG"
    );
    Ok(())
}
