//! Helpers for running the external command-line tools behind the backends.

use std::path::Path;
use std::process::{Command, Output};

use super::ExtractionError;

/// External executables used by the default backends.
pub const EXTERNAL_TOOLS: &[&str] = &["pdftotext", "pdfinfo", "pdftohtml", "pdftoppm", "camelot"];

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Availability of every external tool, in a stable order.
pub fn check_tools() -> Vec<(String, bool)> {
    EXTERNAL_TOOLS
        .iter()
        .map(|tool| (tool.to_string(), check_binary(tool)))
        .collect()
}

/// Name of the program a command runs, for error messages.
fn program_name(cmd: &Command) -> String {
    Path::new(cmd.get_program())
        .file_name()
        .unwrap_or(cmd.get_program())
        .to_string_lossy()
        .into_owned()
}

/// Run a command to completion and require a zero exit status.
///
/// A missing executable becomes [`ExtractionError::ToolNotFound`] naming the
/// package that provides it. A non-zero exit carries the trimmed stderr.
fn run_to_completion(cmd: &mut Command, package: &str) -> Result<Output, ExtractionError> {
    let program = program_name(cmd);
    let output = cmd.output().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            ExtractionError::ToolNotFound(format!("{} (install {})", program, package))
        }
        _ => ExtractionError::Io(e),
    })?;

    if output.status.success() {
        return Ok(output);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = match stderr.trim() {
        "" => output.status.to_string(),
        trimmed => trimmed.to_string(),
    };
    Err(ExtractionError::ExtractionFailed(format!("{} failed: {}", program, detail)))
}

/// Run a tool and return its stdout, decoded lossily.
pub fn run_capture(cmd: &mut Command, package: &str) -> Result<String, ExtractionError> {
    let output = run_to_completion(cmd, package)?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a tool for its side effect: the file it writes.
pub fn run_for_file(cmd: &mut Command, package: &str, produced: &Path) -> Result<(), ExtractionError> {
    run_to_completion(cmd, package)?;
    expect_output_file(produced, &program_name(cmd))
}

/// Require that a tool produced the file it was asked to write.
fn expect_output_file(path: &Path, tool_name: &str) -> Result<(), ExtractionError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ExtractionError::ExtractionFailed(format!(
            "{} did not produce {}",
            tool_name,
            path.display()
        )))
    }
}
