// icon-tool - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every failure is fatal to the run; the binary reports the top-level
// message and exits non-zero.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Top-level error type for all icon-tool operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum IconToolError {
    /// An external tool was missing, misbehaved, or produced bad output.
    Tool(ToolError),

    /// The icon catalog (sources, names, sizes) is inconsistent.
    Catalog(CatalogError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl IconToolError {
    /// Shorthand for wrapping a filesystem error with its path and operation.
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation,
            source,
        }
    }
}

impl fmt::Display for IconToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tool(e) => write!(f, "Tool error: {e}"),
            Self::Catalog(e) => write!(f, "Catalog error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for IconToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tool(e) => Some(e),
            Self::Catalog(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Tool errors
// ---------------------------------------------------------------------------

/// Errors related to locating and running external executables.
#[derive(Debug)]
pub enum ToolError {
    /// A required executable is not on the search path.
    MissingTool { name: String },

    /// A tool's version output did not match the expected shape.
    UnknownVersionFormat { tool: String, raw: String },

    /// A tool exited with a non-zero status (or was killed by a signal).
    ProcessFailed { program: String, status: ExitStatus },

    /// A tool could not be started at all.
    Spawn { program: String, source: io::Error },

    /// A tool wrote output that is not valid UTF-8 where text was expected.
    NonUtf8Output { program: String },

    /// The rewritten 256 px frame still lacks an alpha channel.
    RgbaNotForced { path: PathBuf, channels: u8 },

    /// A generated PNG could not be inspected.
    ImageInspect {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTool { name } => write!(f, "{name} not found"),
            Self::UnknownVersionFormat { tool, raw } => {
                write!(f, "Can't determine the version of '{tool}' from {raw:?}")
            }
            Self::ProcessFailed { program, status } => {
                write!(f, "'{program}' failed ({status})")
            }
            Self::Spawn { program, source } => {
                write!(f, "Failed to run '{program}': {source}")
            }
            Self::NonUtf8Output { program } => {
                write!(f, "'{program}' produced non-UTF-8 output")
            }
            Self::RgbaNotForced { path, channels } => write!(
                f,
                "'{}' has {channels} channel(s) after RGBA conversion, expected 4",
                path.display()
            ),
            Self::ImageInspect { path, source } => {
                write!(f, "Cannot inspect PNG '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::ImageInspect { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ToolError> for IconToolError {
    fn from(e: ToolError) -> Self {
        Self::Tool(e)
    }
}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

/// Errors related to icon sources and the requested icon set.
#[derive(Debug)]
pub enum CatalogError {
    /// The generic SVG for an icon does not exist.
    MissingSource { icon: String, path: PathBuf },

    /// Explicitly requested names that have no generic SVG. Sorted.
    UnknownIcons { names: Vec<String> },

    /// The `sizes/scalable` directory does not exist.
    SizesDirMissing { path: PathBuf },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource { icon, path } => {
                write!(f, "{} does not exist (icon '{icon}')", path.display())
            }
            Self::UnknownIcons { names } => {
                write!(f, "Unknown icon names: {}", names.join(", "))
            }
            Self::SizesDirMissing { path } => {
                write!(f, "Source directory '{}' does not exist", path.display())
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<CatalogError> for IconToolError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for icon-tool results.
pub type Result<T> = std::result::Result<T, IconToolError>;
