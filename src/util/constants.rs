// icon-tool - util/constants.rs
//
// Single source of truth for all named constants, tool names, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "icon-tool";

/// Application identifier used for the platform config directory.
pub const APP_ID: &str = "icon-tool";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// File layout
// =============================================================================

/// Directory (relative to the icons root) holding all per-size directories.
pub const SIZES_DIR_NAME: &str = "sizes";

/// Subdirectory of `sizes/` holding the generic SVG sources.
pub const SCALABLE_DIR_NAME: &str = "scalable";

pub const SVG_EXTENSION: &str = "svg";
pub const PNG_EXTENSION: &str = "png";
pub const ICO_EXTENSION: &str = "ico";

/// Literal accepted by `gen_png` in place of explicit names.
pub const ALL_ICONS_KEYWORD: &str = "all";

// =============================================================================
// Application icon
// =============================================================================

/// Icon name (and output file stem) of the application ICO.
pub const DEFAULT_APP_ICON_NAME: &str = "dpscreenocr";

/// Frame sizes embedded in the application ICO, ascending.
///
/// See the Windows icon size requirements:
/// https://learn.microsoft.com/en-us/windows/win32/uxguide/vis-icons#size-requirements
pub const APP_ICON_SIZES: &[u32] = &[16, 32, 48, 256];

/// The frame size that must be stored as an RGBA PNG inside the ICO.
pub const RGBA_FRAME_SIZE: u32 = 256;

// =============================================================================
// External tools
// =============================================================================

/// ImageMagick >= 7 entry point (also the only name used on Windows).
pub const MAGICK_EXE: &str = "magick";

/// ImageMagick < 7 entry point. Never probed on Windows, where `convert`
/// is an unrelated system utility.
pub const MAGICK_LEGACY_EXE: &str = "convert";

pub const RSVG_CONVERT_EXE: &str = "rsvg-convert";
pub const INKSCAPE_EXE: &str = "inkscape";
pub const OPTIPNG_EXE: &str = "optipng";
pub const ICOTOOL_EXE: &str = "icotool";

/// Human-readable name used when no ImageMagick entry point is found.
pub const IMAGE_MAGICK_DISPLAY_NAME: &str = "ImageMagick";

/// ImageMagick versions below this do not store the 256 px frame as PNG
/// when writing an ICO, so icotool is used instead.
pub const MIN_IMAGE_MAGICK_ICO_VERSION: &[u32] = &[6, 7, 8];

/// Inkscape versions below this only understand the legacy `--export-png`.
pub const MIN_INKSCAPE_MODERN_EXPORT_VERSION: &[u32] = &[1];

// =============================================================================
// Scratch files
// =============================================================================

/// Prefix of the scratch directory holding PNGs rendered for an ICO.
pub const ICO_SCRATCH_DIR_PREFIX: &str = "icon-tool-ico-tmp-";

/// Prefix of the temporary RGBA rewrite of the 256 px frame.
pub const RGBA_TEMP_FILE_PREFIX: &str = "icon-tool-ico-tmp-256-rgba-";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in the config file.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Project-local configuration file name, looked up in the icons root.
pub const LOCAL_CONFIG_FILE_NAME: &str = "icon-tool.toml";

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
