// icon-tool - app/converter.rs
//
// SVG -> PNG rasterisation strategy.
//
// All three backends end up in librsvg, which is the only renderer we trust
// for these SVGs:
//   - Windows: ImageMagick from the official site bundles librsvg, and there
//     are no official rsvg-convert builds.
//   - Elsewhere: rsvg-convert. ImageMagick may have been built without
//     librsvg, in which case it falls back to its own renderer.
//   - Anywhere: Inkscape, last because it is slow to start.

use crate::core::model::{Platform, SizePixels};
use crate::core::version;
use crate::platform::exec;
use crate::platform::tools::ExeResolver;
use crate::util::constants;
use crate::util::error::ToolError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Which export flag an Inkscape binary understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkscapeExport {
    /// Pre-1.0: `--export-png=<file>`.
    Legacy,
    /// 1.0 and later: `--export-filename=<file>`.
    Current,
}

/// A selected SVG rasteriser, ready to be invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvgConverter {
    Magick { exe: PathBuf },
    RsvgConvert { exe: PathBuf },
    Inkscape { exe: PathBuf, export: InkscapeExport },
}

impl SvgConverter {
    /// Pick the converter for this environment.
    ///
    /// The platform's primary tool is used exclusively if present; otherwise
    /// Inkscape is required, and its version decides the export flag.
    pub fn probe(resolver: &ExeResolver) -> Result<Self, ToolError> {
        let primary = match resolver.env().platform {
            Platform::Windows => resolver
                .find(constants::MAGICK_EXE)
                .map(|exe| Self::Magick { exe }),
            Platform::Unix => resolver
                .find(constants::RSVG_CONVERT_EXE)
                .map(|exe| Self::RsvgConvert { exe }),
        };

        if let Some(converter) = primary {
            tracing::info!(
                converter = converter.name(),
                exe = %converter.exe().display(),
                "Using {} for SVG conversion",
                converter.name()
            );
            return Ok(converter);
        }

        let exe = resolver.require(constants::INKSCAPE_EXE)?;

        // Newer Inkscape still accepts the legacy flag but prints a
        // deprecation warning for it.
        let raw = exec::capture_stdout(&mut exec::command(&exe, ["--version"]))?;
        let version = version::parse_inkscape_version(&raw)?;
        let export = if version.is_below(constants::MIN_INKSCAPE_MODERN_EXPORT_VERSION) {
            InkscapeExport::Legacy
        } else {
            InkscapeExport::Current
        };

        tracing::info!(
            exe = %exe.display(),
            %version,
            export = ?export,
            "Using Inkscape for SVG conversion"
        );
        Ok(Self::Inkscape { exe, export })
    }

    /// Short backend name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Magick { .. } => "ImageMagick",
            Self::RsvgConvert { .. } => "rsvg-convert",
            Self::Inkscape { .. } => "Inkscape",
        }
    }

    pub fn exe(&self) -> &Path {
        match self {
            Self::Magick { exe } | Self::RsvgConvert { exe } | Self::Inkscape { exe, .. } => exe,
        }
    }

    /// Command-line arguments rendering `svg` to a `size`x`size` PNG at `png`.
    pub fn args(&self, svg: &Path, png: &Path, size: SizePixels) -> Vec<OsString> {
        match self {
            Self::Magick { .. } => vec![
                "-size".into(),
                format!("{size}x{size}").into(),
                svg.into(),
                png.into(),
            ],
            Self::RsvgConvert { .. } => vec![
                svg.into(),
                format!("--height={size}").into(),
                format!("--width={size}").into(),
                "--keep-aspect-ratio".into(),
                "--format=png".into(),
                flag_with_path("--output=", png),
            ],
            Self::Inkscape { export, .. } => {
                let output_flag = match export {
                    InkscapeExport::Legacy => "--export-png=",
                    InkscapeExport::Current => "--export-filename=",
                };
                vec![
                    svg.into(),
                    format!("--export-height={size}").into(),
                    format!("--export-width={size}").into(),
                    flag_with_path(output_flag, png),
                ]
            }
        }
    }

    /// Render `svg` into `png` at `size`. Blocks until the tool exits.
    pub fn convert(&self, svg: &Path, png: &Path, size: SizePixels) -> Result<(), ToolError> {
        exec::run(&mut exec::command(self.exe(), self.args(svg, png, size)))
    }
}

/// `<flag><path>` as one argument, without lossy UTF-8 conversion.
pub(crate) fn flag_with_path(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path);
    arg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.into_string().expect("utf-8 arg"))
            .collect()
    }

    #[test]
    fn test_magick_args() {
        let c = SvgConverter::Magick {
            exe: PathBuf::from("magick"),
        };
        let args = strings(c.args(Path::new("a.svg"), Path::new("a.png"), 32));
        assert_eq!(args, ["-size", "32x32", "a.svg", "a.png"]);
    }

    #[test]
    fn test_rsvg_args() {
        let c = SvgConverter::RsvgConvert {
            exe: PathBuf::from("rsvg-convert"),
        };
        let args = strings(c.args(Path::new("a.svg"), Path::new("out/a.png"), 16));
        assert_eq!(
            args,
            [
                "a.svg",
                "--height=16",
                "--width=16",
                "--keep-aspect-ratio",
                "--format=png",
                "--output=out/a.png"
            ]
        );
    }

    #[test]
    fn test_inkscape_export_flag_follows_version() {
        let legacy = SvgConverter::Inkscape {
            exe: PathBuf::from("inkscape"),
            export: InkscapeExport::Legacy,
        };
        let current = SvgConverter::Inkscape {
            exe: PathBuf::from("inkscape"),
            export: InkscapeExport::Current,
        };
        let legacy_args = strings(legacy.args(Path::new("a.svg"), Path::new("a.png"), 48));
        let current_args = strings(current.args(Path::new("a.svg"), Path::new("a.png"), 48));
        assert_eq!(legacy_args.last().map(String::as_str), Some("--export-png=a.png"));
        assert_eq!(
            current_args.last().map(String::as_str),
            Some("--export-filename=a.png")
        );
        assert!(legacy_args.contains(&"--export-height=48".to_string()));
        assert!(legacy_args.contains(&"--export-width=48".to_string()));
    }

    #[cfg(unix)]
    mod probing {
        use super::super::*;
        use crate::app::testutil::{write_stub, StubDir};
        use crate::platform::tools::ToolEnv;

        fn resolver(stubs: &StubDir, platform: Platform) -> ExeResolver {
            ExeResolver::new(ToolEnv::with_search_path(stubs.path(), platform))
        }

        #[test]
        fn test_unix_prefers_rsvg_convert() {
            let stubs = StubDir::new();
            write_stub(stubs.path(), "rsvg-convert", "exit 0");
            write_stub(stubs.path(), "magick", "exit 0");
            write_stub(stubs.path(), "inkscape", "exit 1");
            let c = SvgConverter::probe(&resolver(&stubs, Platform::Unix)).unwrap();
            assert_eq!(c.name(), "rsvg-convert");
        }

        #[test]
        fn test_windows_prefers_magick_and_ignores_rsvg() {
            let stubs = StubDir::new();
            write_stub(stubs.path(), "rsvg-convert", "exit 0");
            write_stub(stubs.path(), "magick", "exit 0");
            let c = SvgConverter::probe(&resolver(&stubs, Platform::Windows)).unwrap();
            assert_eq!(c.name(), "ImageMagick");
        }

        #[test]
        fn test_unix_never_uses_magick_for_svg() {
            let stubs = StubDir::new();
            write_stub(stubs.path(), "magick", "exit 0");
            write_stub(
                stubs.path(),
                "inkscape",
                "echo 'Inkscape 1.3 (0e150ed6c4, 2023-07-21)'",
            );
            let c = SvgConverter::probe(&resolver(&stubs, Platform::Unix)).unwrap();
            assert!(matches!(
                c,
                SvgConverter::Inkscape {
                    export: InkscapeExport::Current,
                    ..
                }
            ));
        }

        #[test]
        fn test_legacy_inkscape_detected() {
            let stubs = StubDir::new();
            write_stub(
                stubs.path(),
                "inkscape",
                "echo 'Inkscape 0.92.4 (5da689c313, 2019-01-14)'",
            );
            let c = SvgConverter::probe(&resolver(&stubs, Platform::Windows)).unwrap();
            assert!(matches!(
                c,
                SvgConverter::Inkscape {
                    export: InkscapeExport::Legacy,
                    ..
                }
            ));
        }

        #[test]
        fn test_no_converter_is_missing_inkscape() {
            let stubs = StubDir::new();
            let err = SvgConverter::probe(&resolver(&stubs, Platform::Unix)).unwrap_err();
            assert!(matches!(err, ToolError::MissingTool { ref name } if name == "inkscape"));
        }

        #[test]
        fn test_garbled_inkscape_version_is_fatal() {
            let stubs = StubDir::new();
            write_stub(stubs.path(), "inkscape", "echo 'Inkscape'");
            let err = SvgConverter::probe(&resolver(&stubs, Platform::Unix)).unwrap_err();
            assert!(matches!(err, ToolError::UnknownVersionFormat { .. }));
        }
    }
}
