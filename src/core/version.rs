// icon-tool - core/version.rs
//
// Pure parsers for the version banners of external tools. No process
// invocation happens here; callers capture the output and pass it in.

use crate::core::model::ToolVersion;
use crate::util::error::ToolError;
use regex::Regex;
use std::sync::OnceLock;

/// Matches an ImageMagick banner line, e.g.
/// `Version: ImageMagick 6.9.10-23 Q16 x86_64 20190101 https://...`.
fn image_magick_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^Version:\s+ImageMagick\s+(\d+(?:[.\-]\d+)*)(?:\s|$)")
            .unwrap_or_else(|e| unreachable!("static regex is valid: {e}"))
    })
}

/// Parse `inkscape --version` output (`Inkscape X.Y.Z (rev, date)`).
///
/// The second whitespace-separated token is split on `.` and every
/// component must be an integer.
pub fn parse_inkscape_version(raw: &str) -> Result<ToolVersion, ToolError> {
    let unknown = || ToolError::UnknownVersionFormat {
        tool: crate::util::constants::INKSCAPE_EXE.to_string(),
        raw: raw.to_string(),
    };

    let version_str = raw.split_whitespace().nth(1).ok_or_else(unknown)?;
    parse_dotted(version_str, &['.']).ok_or_else(unknown)
}

/// Parse `magick -version` output.
///
/// Scans for the first `Version: ImageMagick <v>` line; `<v>` looks like
/// `6.9.10-23`, where the dash separates the patch level.
pub fn parse_image_magick_version(tool: &str, raw: &str) -> Result<ToolVersion, ToolError> {
    raw.lines()
        .find_map(|line| {
            image_magick_line_regex()
                .captures(line.trim_start())
                .and_then(|caps| parse_dotted(&caps[1], &['.', '-']))
        })
        .ok_or_else(|| ToolError::UnknownVersionFormat {
            tool: tool.to_string(),
            raw: raw.to_string(),
        })
}

fn parse_dotted(s: &str, separators: &[char]) -> Option<ToolVersion> {
    s.split(separators)
        .map(|part| part.parse::<u32>().ok())
        .collect::<Option<Vec<u32>>>()
        .filter(|parts| !parts.is_empty())
        .map(ToolVersion)
}
