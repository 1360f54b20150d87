//! Open-request hand-off to the host viewer.
//!
//! The browser never loads image data itself. A confirmed selection either
//! leaves the process on stdout after the terminal is restored (so a host
//! viewer or script can consume it), or is passed to an external viewer
//! command kept running alongside the browser (`--exec`).

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Command;
use std::str::FromStr;

use crate::error::Result;

/// Exit codes for the application.
///
/// These codes are stable and can be relied upon for scripting:
/// - `SUCCESS` (0): an open request was delivered (or normal `--exec` exit)
/// - `CANCELLED` (1): the user quit without opening anything
/// - `ERROR` (2): runtime error (I/O error, terminal error, etc.)
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const CANCELLED: i32 = 1;
    pub const ERROR: i32 = 2;
}

/// Output format for emitted open requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One path per line (default).
    #[default]
    Lines,
    /// Null-separated paths (for `xargs -0`).
    NullSeparated,
    /// JSON object with `stack` flag and `paths` array.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" | "line" => Ok(Self::Lines),
            "null" | "nul" | "0" => Ok(Self::NullSeparated),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// A batch of files for the host viewer.
///
/// `stack` asks the viewer to load the files as one image stack instead of
/// separate layers; it is advice, not enforced here.
#[derive(Debug, Clone, Default)]
pub struct OpenRequest {
    pub paths: Vec<PathBuf>,
    pub stack: bool,
}

impl OpenRequest {
    /// A single-file request (activation on a file row).
    pub fn single(path: PathBuf) -> Self {
        Self {
            paths: vec![path],
            stack: false,
        }
    }

    /// A batch request from a multi-selection.
    pub fn batch(paths: Vec<PathBuf>, stack: bool) -> Self {
        Self { paths, stack }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Write the request to `out` in the chosen format.
    pub fn write_to(&self, out: &mut impl Write, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Lines => {
                for path in &self.paths {
                    writeln!(out, "{}", path.display())?;
                }
            }
            OutputFormat::NullSeparated => {
                for path in &self.paths {
                    write!(out, "{}\0", path.display())?;
                }
            }
            OutputFormat::Json => {
                let paths: Vec<String> =
                    self.paths.iter().map(|p| p.display().to_string()).collect();
                let value = serde_json::json!({ "stack": self.stack, "paths": paths });
                writeln!(out, "{}", value)?;
            }
        }
        Ok(())
    }

    /// Emit the request on stdout. Call only after the terminal is restored.
    pub fn emit(&self, format: OutputFormat) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle, format)
    }

    /// Spawn the external viewer command with the request's paths appended.
    ///
    /// The command string is split on whitespace; the first token is the
    /// program, the rest are leading arguments. The child is not awaited —
    /// the browser keeps running while the viewer displays the images.
    pub fn spawn_viewer(&self, command: &str) -> Result<()> {
        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "empty viewer command")
        })?;
        Command::new(program)
            .args(parts)
            .args(&self.paths)
            .spawn()?;
        Ok(())
    }
}
