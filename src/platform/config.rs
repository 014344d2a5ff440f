// icon-tool - platform/config.rs
//
// Configuration file discovery, loading, and validation.
//
// Lookup order:
//   1. `--config <path>` (must exist and parse; errors are fatal)
//   2. `<icons root>/icon-tool.toml`
//   3. `<platform config dir>/config.toml` (via the `directories` crate)
// Files found implicitly are best-effort: problems become warnings and the
// defaults apply.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Platform config directory, if one can be determined.
pub fn platform_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", constants::APP_ID).map(|dirs| dirs.config_dir().to_path_buf())
}

// =============================================================================
// Raw file shape
// =============================================================================

/// Raw deserialisable shape of the config file.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[icons]` section.
    pub icons: IconsSection,
    /// `[tools]` section.
    pub tools: ToolsSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[icons]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct IconsSection {
    /// Icon name of the application ICO.
    pub app_icon_name: Option<String>,
    /// Directory the application ICO is written to, relative to the root.
    pub ico_output_dir: Option<String>,
}

/// `[tools]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ToolsSection {
    /// Directories searched for executables before `PATH`.
    pub extra_search_dirs: Option<Vec<String>>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

// =============================================================================
// Validated config
// =============================================================================

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Icon name (and output stem) of the application ICO.
    pub app_icon_name: String,

    /// Output directory for the application ICO. `None` means the icons root.
    pub ico_output_dir: Option<PathBuf>,

    /// Directories searched for executables before `PATH`.
    pub extra_search_dirs: Vec<PathBuf>,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_icon_name: constants::DEFAULT_APP_ICON_NAME.to_string(),
            ico_output_dir: None,
            extra_search_dirs: Vec::new(),
            log_level: None,
        }
    }
}

/// Load configuration for the icons root at `root`.
///
/// Returns the validated config and any non-fatal warnings. Logging is not
/// initialised yet when this runs, so warnings are returned, not logged.
pub fn load_config(
    explicit: Option<&Path>,
    root: &Path,
) -> Result<(AppConfig, Vec<String>), ConfigError> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw = parse_config(&content, path)?;
        return Ok(validate(raw, path));
    }

    let candidates = std::iter::once(root.join(constants::LOCAL_CONFIG_FILE_NAME))
        .chain(platform_config_dir().map(|dir| dir.join(constants::CONFIG_FILE_NAME)));

    for path in candidates {
        if !path.is_file() {
            continue;
        }

        let mut warnings = Vec::new();
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warnings.push(format!(
                    "Could not read config file '{}': {e}. Using defaults.",
                    path.display()
                ));
                return Ok((AppConfig::default(), warnings));
            }
        };

        return match parse_config(&content, &path) {
            Ok(raw) => Ok(validate(raw, &path)),
            Err(e) => {
                warnings.push(format!("{e}. Using defaults."));
                Ok((AppConfig::default(), warnings))
            }
        };
    }

    Ok((AppConfig::default(), Vec::new()))
}

/// Parse TOML text into the raw config shape.
pub fn parse_config(content: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Validate each field, accumulating warnings for rejected values.
fn validate(raw: RawConfig, path: &Path) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    // -- Icons: app_icon_name --
    if let Some(name) = raw.icons.app_icon_name {
        if is_valid_icon_name(&name) {
            config.app_icon_name = name;
        } else {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "icons.app_icon_name".to_string(),
                    value: name,
                    expected: "a non-empty file stem without path separators".to_string(),
                }
                .to_string(),
            );
        }
    }

    // -- Icons: ico_output_dir --
    if let Some(dir) = raw.icons.ico_output_dir {
        if dir.trim().is_empty() {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "icons.ico_output_dir".to_string(),
                    value: dir,
                    expected: "a non-empty directory path".to_string(),
                }
                .to_string(),
            );
        } else {
            config.ico_output_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Tools: extra_search_dirs --
    if let Some(dirs) = raw.tools.extra_search_dirs {
        config.extra_search_dirs = dirs
            .into_iter()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .collect();
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "logging.level".to_string(),
                    value: level,
                    expected: constants::VALID_LOG_LEVELS.join(", "),
                }
                .to_string(),
            );
        }
    }

    if !warnings.is_empty() {
        warnings = warnings
            .into_iter()
            .map(|w| format!("{w} (in '{}'; using default)", path.display()))
            .collect();
    }

    (config, warnings)
}

fn is_valid_icon_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && name.trim() == name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(None, dir.path()).unwrap();
        // A platform config file could exist on a developer machine; only the
        // local lookup is under test here.
        if platform_config_dir()
            .map(|d| d.join(constants::CONFIG_FILE_NAME).is_file())
            .unwrap_or(false)
        {
            return;
        }
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_local_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(constants::LOCAL_CONFIG_FILE_NAME),
            "[icons]\napp_icon_name = \"myapp\"\nico_output_dir = \"out\"\n\
             [tools]\nextra_search_dirs = [\"/opt/im/bin\", \"\"]\n\
             [logging]\nlevel = \"DEBUG\"\n",
        )
        .unwrap();

        let (config, warnings) = load_config(None, dir.path()).unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.app_icon_name, "myapp");
        assert_eq!(config.ico_output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.extra_search_dirs, vec![PathBuf::from("/opt/im/bin")]);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_fall_back_with_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "[icons]\napp_icon_name = \"../evil\"\n[logging]\nlevel = \"loud\"\n",
        )
        .unwrap();

        let (config, warnings) = load_config(Some(&path), dir.path()).unwrap();
        assert_eq!(config.app_icon_name, constants::DEFAULT_APP_ICON_NAME);
        assert_eq!(config.log_level, None);
        assert_eq!(warnings.len(), 2, "got: {warnings:?}");
    }

    #[test]
    fn test_unparseable_local_config_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(constants::LOCAL_CONFIG_FILE_NAME),
            "[icons\n",
        )
        .unwrap();
        let (config, warnings) = load_config(None, dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_explicit_config_errors_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config(Some(&missing), dir.path()),
            Err(ConfigError::Io { .. })
        ));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "= nonsense").unwrap();
        assert!(matches!(
            load_config(Some(&broken), dir.path()),
            Err(ConfigError::TomlParse { .. })
        ));
    }
}
