//! Configuration structures for the intake pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for the docintake pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Upload validation and staging configuration.
    pub upload: UploadConfig,

    /// PDF text layer configuration.
    pub pdf: PdfConfig,

    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Upload validation and staging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Size ceiling for a single upload, in bytes.
    pub max_file_size: u64,

    /// Scratch directory where uploads are staged while processed.
    pub scratch_dir: PathBuf,

    /// Deadline for the PDF/OCR call, in seconds (0 = no deadline).
    pub engine_timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            scratch_dir: std::env::temp_dir().join("docintake-uploads"),
            engine_timeout_secs: 60,
        }
    }
}

impl UploadConfig {
    /// Engine deadline, `None` when disabled.
    pub fn engine_timeout(&self) -> Option<Duration> {
        (self.engine_timeout_secs > 0).then(|| Duration::from_secs(self.engine_timeout_secs))
    }
}

/// PDF text layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Confidence reported for text taken from a PDF text layer (0 - 100).
    pub text_layer_confidence: f32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            text_layer_confidence: 95.0,
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Language hints passed to the engine (ISO 639-2 or 639-1 codes).
    pub languages: Vec<String>,

    /// Directory containing the detection/recognition models.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: vec!["fra".to_string(), "eng".to_string()],
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

impl OcrConfig {
    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.model_dir.join(model_name)
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum number of characters of recognized text echoed back to the caller.
    pub preview_chars: usize,

    /// Reject resolved birth dates that do not exist in the calendar.
    pub strict_calendar: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            preview_chars: 2000,
            strict_calendar: false,
        }
    }
}

impl IntakeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IntakeConfig::default();
        assert_eq!(config.upload.max_file_size, 10_485_760);
        assert_eq!(config.pdf.text_layer_confidence, 95.0);
        assert_eq!(config.extraction.preview_chars, 2000);
        assert!(!config.extraction.strict_calendar);
        assert_eq!(config.upload.engine_timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: IntakeConfig =
            serde_json::from_str(r#"{"upload": {"engine_timeout_secs": 0}}"#).unwrap();
        assert_eq!(config.upload.engine_timeout(), None);
        assert_eq!(config.upload.max_file_size, 10_485_760);
        assert_eq!(config.ocr.languages, vec!["fra", "eng"]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = IntakeConfig::default();
        config.ocr.languages = vec!["fra".to_string()];
        config.save(&path).unwrap();

        let loaded = IntakeConfig::from_file(&path).unwrap();
        assert_eq!(loaded.ocr.languages, vec!["fra"]);
    }
}
