// icon-tool - app/ico.rs
//
// ICO assembly strategy.
//
// PNGs embedded in an ICO must be RGBA or Windows ignores them, and some of
// our tools (rsvg-convert, optipng) drop the alpha channel from images with
// no transparent pixels. Neither backend fixes this reliably:
//   - icotool's --raw copies the PNG as is.
//   - ImageMagick tries to force RGBA for the 256 px frame but gets it wrong
//     (https://github.com/ImageMagick/ImageMagick/issues/2756, still open as
//     of 7.1.1-20).
// So the 256 px frame is always rewritten as PNG32 before assembly, whatever
// the backend and its version.
//
// ImageMagick < 6.7.8 does not store the 256 px frame as PNG at all, so
// icotool (icoutils) assembles the ICO there, with the frame passed --raw.

use crate::app::converter::flag_with_path;
use crate::core::model::{IconSizeMap, Platform};
use crate::core::version;
use crate::platform::exec;
use crate::platform::tools::ExeResolver;
use crate::util::constants;
use crate::util::error::{IconToolError, Result, ToolError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// =============================================================================
// Backends
// =============================================================================

/// A tool that turns a size -> PNG mapping into one ICO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IcoBackend {
    /// `icotool --create`, with the 256 px frame embedded raw.
    Icotool { exe: PathBuf },
    /// ImageMagick, given the PNGs followed by the output path.
    ImageMagick { exe: PathBuf },
}

impl IcoBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Icotool { .. } => "icotool",
            Self::ImageMagick { .. } => "ImageMagick",
        }
    }

    pub fn exe(&self) -> &Path {
        match self {
            Self::Icotool { exe } | Self::ImageMagick { exe } => exe,
        }
    }

    /// Command-line arguments assembling `pngs` into `ico`.
    ///
    /// Inputs are always passed in ascending size order.
    pub fn args(&self, pngs: &IconSizeMap, ico: &Path) -> Vec<OsString> {
        match self {
            Self::Icotool { .. } => {
                let mut args: Vec<OsString> =
                    vec!["--create".into(), flag_with_path("--output=", ico)];
                if let Some(raw) = pngs.get(&constants::RGBA_FRAME_SIZE) {
                    args.push(flag_with_path("--raw=", raw));
                }
                args.extend(
                    pngs.iter()
                        .filter(|(size, _)| **size != constants::RGBA_FRAME_SIZE)
                        .map(|(_, path)| OsString::from(path)),
                );
                args
            }
            Self::ImageMagick { .. } => pngs
                .values()
                .map(OsString::from)
                .chain(std::iter::once(ico.into()))
                .collect(),
        }
    }

    fn assemble(&self, pngs: &IconSizeMap, ico: &Path) -> std::result::Result<(), ToolError> {
        exec::run(&mut exec::command(self.exe(), self.args(pngs, ico)))
    }
}

// =============================================================================
// Assembler (backend + RGBA correction)
// =============================================================================

/// The selected ICO backend plus the ImageMagick used for RGBA rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcoAssembler {
    magick: PathBuf,
    backend: IcoBackend,
}

impl IcoAssembler {
    /// Find ImageMagick, read its version, and pick the backend.
    pub fn probe(resolver: &ExeResolver) -> std::result::Result<Self, ToolError> {
        let magick = find_image_magick(resolver)?;

        let raw = exec::capture_stdout(&mut exec::command(&magick, ["-version"]))?;
        let version =
            version::parse_image_magick_version(&magick.display().to_string(), &raw)?;

        let backend = if version.is_below(constants::MIN_IMAGE_MAGICK_ICO_VERSION) {
            tracing::info!(
                exe = %magick.display(),
                %version,
                "Using icotool for ICO creation since ImageMagick is older than 6.7.8"
            );
            IcoBackend::Icotool {
                exe: resolver.require(constants::ICOTOOL_EXE)?,
            }
        } else {
            tracing::info!(exe = %magick.display(), %version, "Using ImageMagick for ICO creation");
            IcoBackend::ImageMagick {
                exe: magick.clone(),
            }
        };

        Ok(Self { magick, backend })
    }

    pub fn backend(&self) -> &IcoBackend {
        &self.backend
    }

    /// Assemble `pngs` into `ico`.
    ///
    /// If a 256 px frame is present it is first rewritten into a temporary
    /// RGBA PNG, which replaces it in the mapping handed to the backend. The
    /// temporary file is removed before this returns, on success or error.
    pub fn assemble(&self, pngs: &IconSizeMap, ico: &Path) -> Result<()> {
        let Some(source) = pngs.get(&constants::RGBA_FRAME_SIZE) else {
            tracing::debug!(backend = self.backend.name(), "No 256 px frame; assembling as is");
            self.backend.assemble(pngs, ico)?;
            return Ok(());
        };

        let rgba = RgbaFrame::create(&self.magick, source)?;

        let mut substituted = pngs.clone();
        substituted.insert(constants::RGBA_FRAME_SIZE, rgba.path().to_path_buf());

        tracing::debug!(
            backend = self.backend.name(),
            ico = %ico.display(),
            "Assembling ICO"
        );
        self.backend.assemble(&substituted, ico)?;
        Ok(())
    }
}

/// `magick`, or on non-Windows also the ImageMagick 6 `convert`.
fn find_image_magick(resolver: &ExeResolver) -> std::result::Result<PathBuf, ToolError> {
    resolver
        .find(constants::MAGICK_EXE)
        .or_else(|| match resolver.env().platform {
            Platform::Unix => resolver.find(constants::MAGICK_LEGACY_EXE),
            Platform::Windows => None,
        })
        .ok_or_else(|| ToolError::MissingTool {
            name: constants::IMAGE_MAGICK_DISPLAY_NAME.to_string(),
        })
}

// =============================================================================
// RGBA frame
// =============================================================================

/// A temporary RGBA copy of a PNG, deleted when dropped.
struct RgbaFrame {
    path: tempfile::TempPath,
}

impl RgbaFrame {
    fn create(magick: &Path, source: &Path) -> Result<Self> {
        let path = tempfile::Builder::new()
            .prefix(constants::RGBA_TEMP_FILE_PREFIX)
            .suffix(".png")
            .tempfile()
            .map_err(|e| IconToolError::io(std::env::temp_dir(), "create temp file", e))?
            .into_temp_path();

        exec::run(&mut exec::command(
            magick,
            [OsString::from(source), flag_with_path("PNG32:", &path)],
        ))?;

        ensure_rgba(&path)?;
        tracing::debug!(source = %source.display(), rgba = %path.display(), "256 px frame forced to RGBA");
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Check the PNG header of `path` declares four channels.
fn ensure_rgba(path: &Path) -> std::result::Result<(), ToolError> {
    use image::ImageDecoder;

    let inspect_err = |source: image::ImageError| ToolError::ImageInspect {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path)
        .map_err(|e| inspect_err(image::ImageError::IoError(e)))?;
    let decoder = image::codecs::png::PngDecoder::new(std::io::BufReader::new(file))
        .map_err(inspect_err)?;

    let channels = decoder.color_type().channel_count();
    if channels != 4 {
        return Err(ToolError::RgbaNotForced {
            path: path.to_path_buf(),
            channels,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size_map() -> IconSizeMap {
        [16, 32, 48, 256]
            .into_iter()
            .map(|s| (s, PathBuf::from(format!("tmp/app-{s}.png"))))
            .collect()
    }

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.into_string().expect("utf-8 arg"))
            .collect()
    }

    #[test]
    fn test_image_magick_args_ascending_then_output() {
        let backend = IcoBackend::ImageMagick {
            exe: PathBuf::from("magick"),
        };
        let args = strings(backend.args(&size_map(), Path::new("app.ico")));
        assert_eq!(
            args,
            [
                "tmp/app-16.png",
                "tmp/app-32.png",
                "tmp/app-48.png",
                "tmp/app-256.png",
                "app.ico"
            ]
        );
    }

    #[test]
    fn test_icotool_args_raw_256() {
        let backend = IcoBackend::Icotool {
            exe: PathBuf::from("icotool"),
        };
        let args = strings(backend.args(&size_map(), Path::new("app.ico")));
        assert_eq!(
            args,
            [
                "--create",
                "--output=app.ico",
                "--raw=tmp/app-256.png",
                "tmp/app-16.png",
                "tmp/app-32.png",
                "tmp/app-48.png"
            ]
        );
    }

    #[test]
    fn test_icotool_args_without_256() {
        let backend = IcoBackend::Icotool {
            exe: PathBuf::from("icotool"),
        };
        let mut pngs = size_map();
        pngs.remove(&256);
        let args = strings(backend.args(&pngs, Path::new("app.ico")));
        assert!(!args.iter().any(|a| a.starts_with("--raw=")));
        assert_eq!(args.len(), 5);
    }

    #[test]
    fn test_ensure_rgba_rejects_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let rgb = dir.path().join("rgb.png");
        let rgba = dir.path().join("rgba.png");
        crate::app::testutil::write_png(&rgb, false);
        crate::app::testutil::write_png(&rgba, true);

        assert!(matches!(
            ensure_rgba(&rgb),
            Err(ToolError::RgbaNotForced { channels: 3, .. })
        ));
        ensure_rgba(&rgba).unwrap();
    }

    #[test]
    fn test_ensure_rgba_rejects_non_png() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.png");
        std::fs::write(&bogus, "not a png").unwrap();
        assert!(matches!(
            ensure_rgba(&bogus),
            Err(ToolError::ImageInspect { .. })
        ));
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
        fn test_modern_image_magick_assembles_itself() {
            let stubs = StubDir::new();
            write_stub(stubs.path(), "magick", "echo 'Version: ImageMagick 7.1.1-20 Q16'");
            let a = IcoAssembler::probe(&resolver(&stubs, Platform::Windows)).unwrap();
            assert_eq!(a.backend().name(), "ImageMagick");
        }

        #[test]
        fn test_threshold_version_uses_image_magick() {
            let stubs = StubDir::new();
            write_stub(stubs.path(), "convert", "echo 'Version: ImageMagick 6.7.8-0 Q16'");
            let a = IcoAssembler::probe(&resolver(&stubs, Platform::Unix)).unwrap();
            assert_eq!(a.backend().name(), "ImageMagick");
        }

        #[test]
        fn test_old_image_magick_requires_icotool() {
            let stubs = StubDir::new();
            write_stub(stubs.path(), "convert", "echo 'Version: ImageMagick 6.7.7-10 Q16'");
            let err = IcoAssembler::probe(&resolver(&stubs, Platform::Unix)).unwrap_err();
            assert!(matches!(err, ToolError::MissingTool { ref name } if name == "icotool"));

            write_stub(stubs.path(), "icotool", "exit 0");
            let a = IcoAssembler::probe(&resolver(&stubs, Platform::Unix)).unwrap();
            assert_eq!(a.backend().name(), "icotool");
        }

        #[test]
        fn test_convert_not_probed_on_windows() {
            let stubs = StubDir::new();
            write_stub(stubs.path(), "convert", "echo 'Version: ImageMagick 6.9.10-23 Q16'");
            let err = IcoAssembler::probe(&resolver(&stubs, Platform::Windows)).unwrap_err();
            assert!(matches!(err, ToolError::MissingTool { ref name } if name == "ImageMagick"));
        }

        #[test]
        fn test_unrecognised_version_is_fatal() {
            let stubs = StubDir::new();
            write_stub(stubs.path(), "magick", "echo 'Converts FAT volumes to NTFS.'");
            let err = IcoAssembler::probe(&resolver(&stubs, Platform::Unix)).unwrap_err();
            assert!(matches!(err, ToolError::UnknownVersionFormat { .. }));
        }
    }
}
