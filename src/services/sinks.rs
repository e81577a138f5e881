//! Output capabilities injected into the controller and the exporter.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Refusing to write outside the output directory: {0}")]
    UnsafePath(String),

    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Receives text the user asked to copy.
pub trait ClipboardSink {
    fn copy(&mut self, content: &str) -> Result<(), SinkError>;
}

/// Receives files the user asked to download, addressed by relative path.
pub trait FileDownloadSink {
    fn download(&mut self, path: &str, content: &str) -> Result<(), SinkError>;
}

/// Writes copied text to standard output.
#[derive(Debug, Default)]
pub struct StdoutClipboard;

impl ClipboardSink for StdoutClipboard {
    fn copy(&mut self, content: &str) -> Result<(), SinkError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{content}").map_err(|source| SinkError::Io {
            path: "<stdout>".to_string(),
            source,
        })
    }
}

/// Writes downloads beneath a root directory, creating parents as needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: Utf8PathBuf,
    written: Vec<Utf8PathBuf>,
}

impl DirectorySink {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Paths written so far, in write order.
    pub fn written(&self) -> &[Utf8PathBuf] {
        &self.written
    }
}

impl FileDownloadSink for DirectorySink {
    fn download(&mut self, path: &str, content: &str) -> Result<(), SinkError> {
        let relative = Utf8Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Utf8Component::Normal(_) | Utf8Component::CurDir));
        if escapes {
            return Err(SinkError::UnsafePath(path.to_string()));
        }

        let target = self.root.join(relative);
        let io_err = |source| SinkError::Io {
            path: target.to_string(),
            source,
        };
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&target, content).map_err(io_err)?;

        tracing::debug!("Wrote {}", target);
        self.written.push(target);
        Ok(())
    }
}
