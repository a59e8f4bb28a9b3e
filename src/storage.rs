//! File-backed line storage, split into an append role and a read role.

use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Appending handle for the store file.
#[derive(Debug, Clone)]
pub(crate) struct LineStore {
    path: PathBuf,
}

impl LineStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> LineStore {
        LineStore { path: path.into() }
    }

    /// Returns a read-only handle over the same file.
    pub(crate) fn as_read(&self) -> LineStoreRead {
        LineStoreRead {
            path: self.path.clone(),
        }
    }

    /// Appends one newline-terminated line, creating the file on first use.
    /// The line and its terminator go out as a single buffered write so
    /// concurrent appends cannot interleave partial lines.
    pub(crate) async fn append_line(&self, line: &str) -> Result<()> {
        let mut buffer = String::with_capacity(line.len() + 1);
        buffer.push_str(line);
        buffer.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;
        file.write_all(buffer.as_bytes())
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;
        Ok(())
    }
}

/// Read-only handle for the store file.
#[derive(Debug, Clone)]
pub(crate) struct LineStoreRead {
    path: PathBuf,
}

impl LineStoreRead {
    pub(crate) fn new(path: impl Into<PathBuf>) -> LineStoreRead {
        LineStoreRead { path: path.into() }
    }

    /// Verifies the path is usable as a store file. A missing file passes;
    /// a path that exists but is not a regular file fails.
    pub(crate) async fn check(&self) -> Result<()> {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(Error::Storage(format!(
                "{} is not a regular file",
                self.path.display()
            ))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(e.to_string())),
        }
    }

    /// Returns all stored lines in append order. A file that does not exist
    /// yet reads as empty.
    pub(crate) async fn read_lines(&self) -> Result<Vec<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content.lines().map(str::to_owned).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(Error::Storage(e.to_string())),
        }
    }
}
