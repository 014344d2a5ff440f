// icon-tool - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Square raster dimension in pixels.
pub type SizePixels = u32;

/// Mapping from frame size to the PNG holding that frame.
///
/// A `BTreeMap` so iteration is always in ascending size order, which is
/// the order both ICO backends expect their inputs in.
pub type IconSizeMap = BTreeMap<SizePixels, PathBuf>;

// =============================================================================
// Platform
// =============================================================================

/// Host platform family, as far as tool selection is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Official ImageMagick builds bundle librsvg; `convert` is a system
    /// utility and must never be probed.
    Windows,
    /// Everything else. ImageMagick may lack librsvg, so rsvg-convert is
    /// preferred for SVG rendering.
    Unix,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

// =============================================================================
// Tool versions
// =============================================================================

/// A dotted numeric version, compared component-wise like a tuple.
///
/// `[6, 9, 10, 23]` > `[6, 7, 8]` and `[1]` < `[1, 0]`, matching
/// lexicographic ordering of the components.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToolVersion(pub Vec<u32>);

impl ToolVersion {
    /// True if this version is strictly below `threshold`.
    pub fn is_below(&self, threshold: &[u32]) -> bool {
        self.0.as_slice() < threshold
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

// =============================================================================
// Operation reports
// =============================================================================

/// Outcome of a batch PNG generation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PngReport {
    /// Targets that were (re-)generated, in processing order.
    pub generated: Vec<PathBuf>,

    /// Targets left untouched because they already existed.
    pub skipped: Vec<PathBuf>,
}
