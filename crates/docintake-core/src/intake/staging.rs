//! Scoped staging of uploaded bytes in the scratch directory.

use std::io::Write;
use std::path::Path;

use tempfile::TempPath;
use tracing::{debug, warn};

use crate::source::DocumentKind;

/// An upload written to the scratch directory.
///
/// The file is deleted when the guard is dropped, whichever way the request
/// ends. Deletion failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct StagedFile {
    path: Option<TempPath>,
    kind: DocumentKind,
}

impl StagedFile {
    /// Write `data` to a uniquely named file in `dir`.
    pub fn stage(dir: &Path, kind: DocumentKind, data: &[u8]) -> std::io::Result<Self> {
        let suffix = format!(".{}", kind.extension());
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile_in(dir)?;

        file.write_all(data)?;
        file.flush()?;

        let path = file.into_temp_path();
        debug!("Staged {} bytes at {}", data.len(), path.display());

        Ok(Self {
            path: Some(path),
            kind,
        })
    }

    /// Location of the staged file.
    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or(Path::new(""))
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let shown = path.display().to_string();
            match path.close() {
                Ok(()) => debug!("Removed staged file {}", shown),
                Err(e) => warn!("Failed to remove staged file {}: {}", shown, e),
            }
        }
    }
}
