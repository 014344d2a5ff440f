// icon-tool - core/catalog.rs
//
// The icon catalog: which icon names and sizes exist, and which SVG feeds
// each (name, size) pair.
//
// Layout (relative to the icons root):
//   sizes/scalable/<name>.svg   generic source, always required
//   sizes/<N>/<name>.svg        optional size-specific override
//   sizes/<N>/<name>.png        generated raster
//
// Only directory listings and existence checks happen here; file contents
// are never read.

use crate::core::model::SizePixels;
use crate::util::constants;
use crate::util::error::{CatalogError, IconToolError, Result};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Paths of the catalog rooted at one icons directory.
#[derive(Debug, Clone)]
pub struct IconCatalog {
    root: PathBuf,
}

impl IconCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `sizes/`
    pub fn sizes_dir(&self) -> PathBuf {
        self.root.join(constants::SIZES_DIR_NAME)
    }

    /// `sizes/scalable/`
    pub fn scalable_dir(&self) -> PathBuf {
        self.sizes_dir().join(constants::SCALABLE_DIR_NAME)
    }

    /// `sizes/<N>/`
    pub fn size_dir(&self, size: SizePixels) -> PathBuf {
        self.sizes_dir().join(size.to_string())
    }

    /// `sizes/<N>/<name>.png`
    pub fn png_path(&self, icon_name: &str, size: SizePixels) -> PathBuf {
        self.size_dir(size)
            .join(format!("{icon_name}.{}", constants::PNG_EXTENSION))
    }

    /// Resolve the SVG that feeds `icon_name` at `size`.
    ///
    /// The generic SVG must exist even when a size-specific override is
    /// present; its absence is `MissingSource`. The override wins if it is
    /// a regular file.
    pub fn svg_source(&self, icon_name: &str, size: SizePixels) -> Result<PathBuf> {
        let svg_name = format!("{icon_name}.{}", constants::SVG_EXTENSION);

        let generic = self.scalable_dir().join(&svg_name);
        if !generic.is_file() {
            return Err(CatalogError::MissingSource {
                icon: icon_name.to_string(),
                path: generic,
            }
            .into());
        }

        let sized = self.size_dir(size).join(&svg_name);
        if sized.is_file() {
            tracing::debug!(icon = icon_name, size, svg = %sized.display(), "Using size-specific SVG");
            return Ok(sized);
        }

        Ok(generic)
    }

    /// Stems of every `*.svg` directly inside `sizes/scalable/`, sorted.
    pub fn icon_names(&self) -> Result<BTreeSet<String>> {
        let dir = self.scalable_dir();
        if !dir.is_dir() {
            return Err(CatalogError::SizesDirMissing { path: dir }.into());
        }

        let names: BTreeSet<String> = list_files_with_extension(&dir, constants::SVG_EXTENSION)?
            .into_iter()
            .filter_map(|path| file_stem(&path))
            .collect();

        tracing::debug!(count = names.len(), "Icon names discovered");
        Ok(names)
    }

    /// Sizes defined by `sizes/<N>/` directories, ascending.
    ///
    /// Only directories whose names are all ASCII digits count; `0` is not
    /// a valid raster size and is ignored with a warning.
    pub fn icon_sizes(&self) -> Result<Vec<SizePixels>> {
        let dir = self.sizes_dir();
        let mut sizes = Vec::new();

        for entry in walkdir::WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.map_err(|e| walk_error(&dir, e))?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            match name.parse::<SizePixels>() {
                Ok(0) | Err(_) => {
                    tracing::warn!(dir = %entry.path().display(), "Ignoring invalid size directory");
                }
                Ok(size) => sizes.push(size),
            }
        }

        sizes.sort_unstable();
        sizes.dedup();
        tracing::debug!(sizes = ?sizes, "Icon sizes discovered");
        Ok(sizes)
    }

    /// Every `*.png` directly inside `sizes/<N>/`.
    pub fn pngs_in_size_dir(&self, size: SizePixels) -> Result<Vec<PathBuf>> {
        list_files_with_extension(&self.size_dir(size), constants::PNG_EXTENSION)
    }
}

/// Regular files directly inside `dir` with extension `ext`.
///
/// A bare `.<ext>` has no extension (its whole name is the stem) and is
/// never listed.
fn list_files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension() == Some(OsStr::new(ext)) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub(crate) fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

fn walk_error(dir: &Path, e: walkdir::Error) -> IconToolError {
    let path = e.path().unwrap_or(dir).to_path_buf();
    let source = e
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("directory loop"));
    IconToolError::io(path, "read directory", source)
}
