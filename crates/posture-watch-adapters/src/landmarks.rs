//! JSON Lines landmark source.
//!
//! Each non-blank line holds one frame:
//!
//! ```json
//! {"timestamp": 0.5, "landmarks": [{"id": 0, "x": 312.0, "y": 140.5, "z": -0.42, "visibility": 0.99}]}
//! ```
//!
//! A frame without a detected body has an empty (or missing) `landmarks` array.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use posture_watch_core::{LandmarkFrame, LandmarkSource};
use tracing::debug;

/// Where frames are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandmarkInput {
    /// A JSONL file.
    File(PathBuf),
    /// Standard input.
    Stdin,
}

impl LandmarkInput {
    /// Parses a CLI argument, treating `-` as standard input.
    #[must_use]
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") {
            Self::Stdin
        } else {
            Self::File(arg.to_path_buf())
        }
    }
}

/// Landmark source reading JSON Lines frames.
pub struct JsonlLandmarkSource {
    input: LandmarkInput,
}

impl JsonlLandmarkSource {
    /// Creates a source for the given input.
    #[must_use]
    pub const fn new(input: LandmarkInput) -> Self {
        Self { input }
    }

    /// Creates a source reading a file.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(LandmarkInput::File(path.into()))
    }

    fn reader(&self) -> Result<Box<dyn BufRead + Send>> {
        match &self.input {
            LandmarkInput::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open landmark file: {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            LandmarkInput::Stdin => {
                let stdin: Box<dyn Read + Send> = Box::new(io::stdin());
                Ok(Box::new(BufReader::new(stdin)))
            }
        }
    }
}

impl LandmarkSource for JsonlLandmarkSource {
    fn frames(&self) -> Box<dyn Iterator<Item = Result<LandmarkFrame>> + Send + '_> {
        let reader = match self.reader() {
            Ok(r) => r,
            Err(e) => return Box::new(std::iter::once(Err(e))),
        };

        let frames = reader
            .lines()
            .enumerate()
            .filter_map(|(i, line)| parse_line(i + 1, line).transpose());
        Box::new(frames)
    }

    fn count_hint(&self) -> Option<usize> {
        let LandmarkInput::File(path) = &self.input else {
            return None;
        };
        let file = File::open(path).ok()?;
        let count = BufReader::new(file)
            .lines()
            .map_while(std::result::Result::ok)
            .filter(|l| !l.trim().is_empty())
            .count();
        debug!("{count} frames in {}", path.display());
        Some(count)
    }
}

/// Parses one line; blank lines yield `None`.
fn parse_line(line_no: usize, line: io::Result<String>) -> Result<Option<LandmarkFrame>> {
    let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .with_context(|| format!("Invalid frame on line {line_no}"))
}
