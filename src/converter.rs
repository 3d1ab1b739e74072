//! External font conversion.
//!
//! Conversions are delegated to FontForge through the [`FontConverter`]
//! trait so that the pipeline can be driven by a test double.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::UNIX_EPOCH;

use crate::error::{Error, Result};

/// Output formats the converter is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    Svg,
    Woff2,
}

impl FontFormat {
    pub fn extension(self) -> &'static str {
        match self {
            FontFormat::Svg => "svg",
            FontFormat::Woff2 => "woff2",
        }
    }
}

/// Converts a font file into another format.
pub trait FontConverter {
    /// Convert `input` into `output`; the format follows the output file
    /// extension. `source_date_epoch` seeds timestamps embedded in the
    /// output so identical input gives identical bytes.
    fn convert(&self, input: &Path, output: &Path, source_date_epoch: Option<u64>) -> Result<()>;
}

/// Modification time of a file in whole seconds since the Unix epoch.
pub fn source_date_epoch(path: &Path) -> Result<u64> {
    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| Error::read(path, e))?;
    Ok(modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0))
}

// ═══════════════════════════════════════════════════════════════════════
// FontForge
// ═══════════════════════════════════════════════════════════════════════

const FONTFORGE: &str = "fontforge";

/// A located, executable FontForge binary.
#[derive(Debug, Clone)]
pub struct FontForge {
    path: PathBuf,
}

impl FontForge {
    /// Use `explicit` when given, otherwise search `PATH`.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => find_on_path(FONTFORGE).ok_or_else(|| Error::ToolUnavailable {
                tool: FONTFORGE.to_string(),
                reason: "could not find fontforge on the PATH; it is required for this operation"
                    .to_string(),
            })?,
        };

        if !is_executable(&path) {
            return Err(Error::ToolUnavailable {
                tool: FONTFORGE.to_string(),
                reason: format!("{} does not point to an executable", path.display()),
            });
        }

        log::debug!("Found fontforge at {}", path.display());
        Ok(FontForge { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn script(input: &Path, output: &Path) -> String {
        format!(
            "import os; fontforge.open(\"{}\").generate(\"{}\")",
            python_escape(input),
            python_escape(output)
        )
    }
}

impl FontConverter for FontForge {
    fn convert(&self, input: &Path, output: &Path, source_date_epoch: Option<u64>) -> Result<()> {
        let script = Self::script(input, output);
        log::debug!("Fontforge script: {script}");

        let mut command = Command::new(&self.path);
        command
            .args(["-lang=py", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(epoch) = source_date_epoch {
            command.env("SOURCE_DATE_EPOCH", epoch.to_string());
        }
        let command_line = format!("{} -lang=py -", self.path.display());

        let mut child = command.spawn().map_err(|e| Error::ToolUnavailable {
            tool: FONTFORGE.to_string(),
            reason: format!("could not start {}: {e}", self.path.display()),
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A converter that exits early closes its end of the pipe.
            if let Err(e) = stdin.write_all(script.as_bytes()) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(Error::io(&self.path, e));
                }
            }
        }

        let result = child
            .wait_with_output()
            .map_err(|e| Error::io(&self.path, e))?;
        if !result.status.success() {
            let mut output = String::from_utf8_lossy(&result.stdout).into_owned();
            output.push_str(&String::from_utf8_lossy(&result.stderr));
            return Err(Error::ToolFailure {
                command: command_line,
                code: result.status.code(),
                output,
            });
        }

        log::debug!("Converted {} to {}", input.display(), output.display());
        Ok(())
    }
}

fn python_escape(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .flat_map(|dir| candidates(&dir, name))
        .find(|p| is_executable(p))
}

fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let mut found = vec![dir.join(name)];
    if cfg!(windows) {
        found.push(dir.join(name).with_extension("exe"));
    }
    found
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() && path.extension() == Some(std::ffi::OsStr::new("exe"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_quotes_paths() {
        let script = FontForge::script(Path::new("/fonts/My \"Font\".svg"), Path::new("/out/a.woff2"));
        assert_eq!(
            script,
            r#"import os; fontforge.open("/fonts/My \"Font\".svg").generate("/out/a.woff2")"#
        );
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = FontForge::locate(Some(Path::new("/nonexistent/fontforge"))).unwrap_err();
        assert!(matches!(err, Error::ToolUnavailable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn explicit_path_must_be_executable() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("fontforge");
        std::fs::write(&fake, "#!/bin/sh\n").unwrap();
        let err = FontForge::locate(Some(&fake)).unwrap_err();
        assert!(err.to_string().contains("does not point to an executable"));
    }

    #[cfg(unix)]
    fn fake_fontforge(dir: &Path, body: &str) -> FontForge {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("fontforge");
        std::fs::write(&path, format!("#!/bin/sh\ncat >/dev/null\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        FontForge::locate(Some(&path)).unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_tool_failure() {
        let dir = tempfile::tempdir().unwrap();
        let ff = fake_fontforge(dir.path(), "echo boom >&2\nexit 3");
        let err = ff
            .convert(Path::new("in.svg"), Path::new("out.woff2"), None)
            .unwrap_err();
        match err {
            Error::ToolFailure { code, output, command } => {
                assert_eq!(code, Some(3));
                assert!(output.contains("boom"));
                assert!(command.ends_with("-lang=py -"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn seed_is_passed_as_source_date_epoch() {
        let dir = tempfile::tempdir().unwrap();
        let ff = fake_fontforge(dir.path(), "echo \"$SOURCE_DATE_EPOCH\" > \"$(dirname \"$0\")/epoch\"");
        ff.convert(Path::new("in.svg"), Path::new("out.woff2"), Some(1_700_000_000))
            .unwrap();
        let epoch = std::fs::read_to_string(dir.path().join("epoch")).unwrap();
        assert_eq!(epoch.trim(), "1700000000");
    }

    #[test]
    fn format_extensions() {
        assert_eq!(FontFormat::Svg.extension(), "svg");
        assert_eq!(FontFormat::Woff2.extension(), "woff2");
    }
}
