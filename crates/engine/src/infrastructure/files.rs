//! File and standard-stream adapters for the payload and output ports.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::infrastructure::ports::{PayloadSource, PortError, StatBlockSink};

/// Parse raw payload text. Blank input is an absent payload, not a JSON error.
pub fn parse_payload(text: &str) -> Result<Value, PortError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(PortError::serialization)
}

/// Reads a payload document from a JSON file.
#[derive(Debug, Clone)]
pub struct FilePayloadSource {
    path: PathBuf,
}

impl FilePayloadSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PayloadSource for FilePayloadSource {
    fn load(&self) -> Result<Value, PortError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| PortError::io(self.path.display(), e))?;
        parse_payload(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads a payload document from standard input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPayloadSource;

impl PayloadSource for StdinPayloadSource {
    fn load(&self) -> Result<Value, PortError> {
        let mut text = String::new();
        std::io::stdin()
            .lock()
            .read_to_string(&mut text)
            .map_err(|e| PortError::io("stdin", e))?;
        parse_payload(&text)
    }

    fn describe(&self) -> String {
        "stdin".to_string()
    }
}

/// Writes the rendered output to a file, replacing any previous content.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatBlockSink for FileSink {
    fn write(&self, rendered: &str) -> Result<(), PortError> {
        std::fs::write(&self.path, with_trailing_newline(rendered))
            .map_err(|e| PortError::io(self.path.display(), e))
    }
}

/// Writes the rendered output to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl StatBlockSink for StdoutSink {
    fn write(&self, rendered: &str) -> Result<(), PortError> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(with_trailing_newline(rendered).as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| PortError::io("stdout", e))
    }
}

fn with_trailing_newline(rendered: &str) -> String {
    if rendered.ends_with('\n') {
        rendered.to_string()
    } else {
        format!("{}\n", rendered)
    }
}
