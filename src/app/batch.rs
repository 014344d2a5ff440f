// icon-tool - app/batch.rs
//
// Batch operations over the icon catalog: generate PNGs, prune PNGs whose
// SVG is gone, and build an ICO. Fully sequential; the first failure aborts
// the operation.

use crate::app::png::generate_png;
use crate::app::toolbox::Toolbox;
use crate::core::catalog::{file_stem, IconCatalog};
use crate::core::model::{IconSizeMap, PngReport, SizePixels};
use crate::util::constants;
use crate::util::error::{CatalogError, IconToolError, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Generate `sizes/<N>/<name>.png` for every requested name and every size.
///
/// `requested` may contain the literal `all` to mean every known icon.
/// Unknown names are all reported together before anything is generated.
/// Existing targets are skipped unless `force_overwrite` is set.
pub fn gen_png(
    toolbox: &Toolbox,
    catalog: &IconCatalog,
    requested: &[String],
    force_overwrite: bool,
) -> Result<PngReport> {
    let known = catalog.icon_names()?;

    let names: BTreeSet<String> = if requested.iter().any(|n| n == constants::ALL_ICONS_KEYWORD) {
        known
    } else {
        let requested: BTreeSet<String> = requested.iter().cloned().collect();
        let unknown: Vec<String> = requested.difference(&known).cloned().collect();
        if !unknown.is_empty() {
            return Err(CatalogError::UnknownIcons { names: unknown }.into());
        }
        requested
    };

    let sizes = catalog.icon_sizes()?;
    tracing::info!(icons = names.len(), sizes = ?sizes, force_overwrite, "Generating PNGs");

    let mut report = PngReport::default();
    for name in &names {
        for &size in &sizes {
            let png = catalog.png_path(name, size);
            if !force_overwrite && png.exists() {
                tracing::debug!(png = %png.display(), "Exists; skipping");
                report.skipped.push(png);
                continue;
            }
            generate_png(toolbox, catalog, name, &png, size)?;
            report.generated.push(png);
        }
    }

    tracing::info!(
        generated = report.generated.len(),
        skipped = report.skipped.len(),
        "PNG generation complete"
    );
    Ok(report)
}

/// Remove every `sizes/<N>/*.png` whose stem is not a current icon name.
///
/// Returns the removed paths. Running it twice in a row removes nothing the
/// second time.
pub fn remove_outdated_png(catalog: &IconCatalog) -> Result<Vec<PathBuf>> {
    let names = catalog.icon_names()?;
    let mut removed = Vec::new();

    for size in catalog.icon_sizes()? {
        for png in catalog.pngs_in_size_dir(size)? {
            let current = file_stem(&png).is_some_and(|stem| names.contains(&stem));
            if current {
                continue;
            }
            std::fs::remove_file(&png)
                .map_err(|e| IconToolError::io(&png, "remove outdated PNG", e))?;
            tracing::info!(png = %png.display(), "Removed outdated PNG");
            removed.push(png);
        }
    }

    tracing::info!(removed = removed.len(), "Outdated PNG removal complete");
    Ok(removed)
}

/// Build `<out_dir>/<icon_name>.ico` from freshly rendered PNGs at `sizes`.
///
/// The PNGs are rendered into a private scratch directory that is removed
/// when this returns, whether or not assembly succeeded.
pub fn gen_ico(
    toolbox: &Toolbox,
    catalog: &IconCatalog,
    icon_name: &str,
    out_dir: &Path,
    sizes: &[SizePixels],
) -> Result<PathBuf> {
    // Select the assembler first so a missing ImageMagick fails before any
    // rendering work.
    let assembler = toolbox.assembler()?;

    std::fs::create_dir_all(out_dir)
        .map_err(|e| IconToolError::io(out_dir, "create output directory", e))?;

    let scratch = tempfile::Builder::new()
        .prefix(constants::ICO_SCRATCH_DIR_PREFIX)
        .tempdir()
        .map_err(|e| IconToolError::io(std::env::temp_dir(), "create scratch directory", e))?;
    tracing::debug!(scratch = %scratch.path().display(), "Scratch directory created");

    let mut pngs = IconSizeMap::new();
    for &size in sizes {
        let png = scratch.path().join(format!(
            "{icon_name}-{size}.{}",
            constants::PNG_EXTENSION
        ));
        generate_png(toolbox, catalog, icon_name, &png, size)?;
        pngs.insert(size, png);
    }

    let ico = out_dir.join(format!("{icon_name}.{}", constants::ICO_EXTENSION));
    assembler.assemble(&pngs, &ico)?;

    let scratch_path = scratch.path().to_path_buf();
    scratch
        .close()
        .map_err(|e| IconToolError::io(scratch_path, "remove scratch directory", e))?;

    tracing::info!(ico = %ico.display(), sizes = ?sizes, "Generated ICO");
    Ok(ico)
}

/// Build the application ICO at the fixed application icon sizes.
pub fn gen_app_ico(
    toolbox: &Toolbox,
    catalog: &IconCatalog,
    app_icon_name: &str,
    out_dir: &Path,
) -> Result<PathBuf> {
    gen_ico(
        toolbox,
        catalog,
        app_icon_name,
        out_dir,
        constants::APP_ICON_SIZES,
    )
}
