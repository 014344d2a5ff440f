// icon-tool - platform/exec.rs
//
// Blocking external-process execution. One process at a time; every call
// waits for completion. A non-zero exit is always an error and is never
// retried.

use crate::util::error::ToolError;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

/// Build a command for `program` with the given arguments.
pub fn command<I, S>(program: &Path, args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd
}

/// Run `cmd` to completion with inherited stdio.
pub fn run(cmd: &mut Command) -> Result<(), ToolError> {
    let program = program_name(cmd);
    tracing::debug!(command = ?cmd, "Running");

    let status = cmd.status().map_err(|source| ToolError::Spawn {
        program: program.clone(),
        source,
    })?;

    if !status.success() {
        tracing::error!(program = %program, %status, "External tool failed");
        return Err(ToolError::ProcessFailed { program, status });
    }
    Ok(())
}

/// Run `cmd` to completion and return its stdout as text.
///
/// stderr is passed through so tool diagnostics stay visible.
pub fn capture_stdout(cmd: &mut Command) -> Result<String, ToolError> {
    let program = program_name(cmd);
    tracing::debug!(command = ?cmd, "Capturing output");

    let output = cmd
        .stderr(std::process::Stdio::inherit())
        .output()
        .map_err(|source| ToolError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !output.status.success() {
        tracing::error!(program = %program, status = %output.status, "External tool failed");
        return Err(ToolError::ProcessFailed {
            program,
            status: output.status,
        });
    }

    String::from_utf8(output.stdout).map_err(|_| ToolError::NonUtf8Output { program })
}

fn program_name(cmd: &Command) -> String {
    cmd.get_program().to_string_lossy().into_owned()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_success() {
        let mut cmd = command(Path::new("sh"), ["-c", "exit 0"]);
        run(&mut cmd).unwrap();
    }

    #[test]
    fn test_run_non_zero_exit_is_process_failed() {
        let mut cmd = command(Path::new("sh"), ["-c", "exit 3"]);
        let err = run(&mut cmd).unwrap_err();
        match err {
            ToolError::ProcessFailed { program, status } => {
                assert_eq!(program, "sh");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_spawn_failure() {
        let mut cmd = command(Path::new("/nonexistent/icon-tool-no-such-exe"), ["x"]);
        assert!(matches!(run(&mut cmd), Err(ToolError::Spawn { .. })));
    }

    #[test]
    fn test_capture_stdout() {
        let mut cmd = command(Path::new("sh"), ["-c", "echo 'Inkscape 1.2.2 (abc)'"]);
        let out = capture_stdout(&mut cmd).unwrap();
        assert_eq!(out.trim(), "Inkscape 1.2.2 (abc)");
    }
}
