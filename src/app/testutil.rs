// icon-tool - app/testutil.rs
//
// Shell-script stand-ins for external tools, for unit tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A private directory used as the whole tool search path.
pub struct StubDir(TempDir);

impl StubDir {
    pub fn new() -> Self {
        Self(tempfile::tempdir().expect("stub tempdir"))
    }

    pub fn path(&self) -> &Path {
        self.0.path()
    }
}

/// Write an executable `/bin/sh` script called `name` into `dir`.
#[cfg(unix)]
pub fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod stub");
    path
}

/// Write a small solid PNG, with or without an alpha channel.
pub fn write_png(path: &Path, with_alpha: bool) {
    if with_alpha {
        image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 128]))
            .save(path)
            .expect("save rgba png");
    } else {
        image::RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]))
            .save(path)
            .expect("save rgb png");
    }
}

