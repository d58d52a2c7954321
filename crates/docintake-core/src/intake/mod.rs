//! Upload lifecycle: validation, staging, text extraction and field parsing.

mod staging;

pub use staging::StagedFile;

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{ExtractionError, IntakeError, Result};
use crate::identity::IdentityParser;
use crate::models::config::{IntakeConfig, UploadConfig};
use crate::models::scan::{ExtractionInput, ScanResult};
use crate::source::{DocumentKind, TextSource};

/// MIME type declared for files whose extension is not recognized.
const UNKNOWN_MIME: &str = "application/octet-stream";

/// One uploaded file as received from the caller.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Original file name.
    pub filename: String,
    /// Declared MIME type.
    pub content_type: String,
    /// File contents.
    pub data: Vec<u8>,
}

impl IncomingFile {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Read a file from disk, declaring the MIME type implied by its extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let content_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(DocumentKind::mime_from_extension)
            .unwrap_or(UNKNOWN_MIME);
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(filename, content_type, data))
    }

    /// Override the declared MIME type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Runs one upload through the whole pipeline and cleans up after it.
#[derive(Clone)]
pub struct UploadLifecycleManager {
    source: TextSource,
    parser: IdentityParser,
    config: UploadConfig,
}

impl UploadLifecycleManager {
    /// Create a manager over `source`, configured from `config`.
    pub fn new(source: TextSource, config: &IntakeConfig) -> Self {
        Self {
            source: source.with_config(config),
            parser: IdentityParser::from_config(&config.extraction),
            config: config.upload.clone(),
        }
    }

    /// Replace the field parser.
    pub fn with_parser(mut self, parser: IdentityParser) -> Self {
        self.parser = parser;
        self
    }

    /// Directory where uploads are staged.
    pub fn scratch_dir(&self) -> &Path {
        &self.config.scratch_dir
    }

    /// Check the upload against the single-file, format and size rules.
    ///
    /// Nothing is staged and no engine is called when this fails.
    pub fn validate<'a>(&self, files: &'a [IncomingFile]) -> Result<(&'a IncomingFile, DocumentKind)> {
        let file = match files {
            [] => return Err(IntakeError::NoFile),
            [file] => file,
            many => return Err(IntakeError::TooManyFiles(many.len())),
        };

        let kind = DocumentKind::from_mime(&file.content_type)
            .ok_or_else(|| IntakeError::UnsupportedFormat(file.content_type.clone()))?;

        if file.size() > self.config.max_file_size {
            return Err(IntakeError::FileTooLarge {
                size: file.size(),
                limit: self.config.max_file_size,
            });
        }

        Ok((file, kind))
    }

    /// Validate, stage, extract text and parse identity fields.
    ///
    /// The staged copy is removed before this returns, on success and on error.
    pub async fn process(&self, files: Vec<IncomingFile>) -> Result<ScanResult> {
        let start = Instant::now();

        let kind = match self.validate(&files) {
            Ok((file, kind)) => {
                info!(
                    "Processing {:?} ({}, {} bytes)",
                    file.filename,
                    file.content_type,
                    file.size()
                );
                kind
            }
            Err(e) => {
                info!("Upload rejected: {}", e);
                return Err(e);
            }
        };
        let data = files.into_iter().next().map(|file| file.data).unwrap_or_default();

        let staged = self.stage(kind, data).await?;

        let input = self.extract_text(&staged).await?;
        let result = self.parser.parse(&input);

        info!(
            "Scan finished in {}ms: {}/3 fields resolved",
            start.elapsed().as_millis(),
            result.resolved_count()
        );

        Ok(result)
    }

    /// Write the upload to the scratch directory on a blocking worker.
    pub async fn stage(&self, kind: DocumentKind, data: Vec<u8>) -> Result<StagedFile> {
        let dir = self.config.scratch_dir.clone();
        tokio::fs::create_dir_all(&dir).await?;

        let staged = tokio::task::spawn_blocking(move || StagedFile::stage(&dir, kind, &data))
            .await
            .map_err(|e| ExtractionError::Worker(e.to_string()))??;
        Ok(staged)
    }

    /// Run the text source on a blocking worker, bounded by the engine timeout.
    async fn extract_text(&self, staged: &StagedFile) -> std::result::Result<ExtractionInput, ExtractionError> {
        let source = self.source.clone();
        let path = staged.path().to_path_buf();
        let kind = staged.kind();

        let task = tokio::task::spawn_blocking(move || source.extract(&path, kind));

        let joined = match self.config.engine_timeout() {
            Some(limit) => match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined,
                Err(_) => {
                    warn!("Text source did not finish within {:?}", limit);
                    return Err(ExtractionError::Timeout(limit));
                }
            },
            None => task.await,
        };

        let input = joined.map_err(|e| ExtractionError::Worker(e.to_string()))??;
        debug!("Text source returned {} characters", input.text.len());
        Ok(input)
    }
}
