//! OCR backends for photographed documents.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// An OCR engine able to read an image file.
pub trait OcrBackend: Send + Sync {
    /// Recognize the text of the image at `path`, using `languages` as hints.
    fn recognize(&self, path: &Path, languages: &[String]) -> Result<Recognition>;
}

/// A recognized line of text with its position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Output of an OCR engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recognition {
    /// Full text, boxes joined with newlines in reading order.
    pub text: String,

    /// Engine-reported confidence (0 - 100); `None` when the engine has no score.
    pub confidence: Option<f32>,

    /// Individual boxes, when the engine reports them.
    pub boxes: Vec<TextBox>,
}

impl Recognition {
    /// Build a recognition from boxes, ordering them top-to-bottom, left-to-right.
    ///
    /// The confidence is the mean box confidence scaled to 0 - 100.
    pub fn from_boxes(mut boxes: Vec<TextBox>) -> Self {
        boxes.sort_by(|a, b| {
            let (ax, ay, _, _) = a.rect();
            let (bx, by, _, _) = b.rect();

            // Group by approximate vertical position (within 20 pixels)
            let row_a = (ay / 20.0) as i32;
            let row_b = (by / 20.0) as i32;

            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        let confidence = if boxes.is_empty() {
            None
        } else {
            let mean = boxes.iter().map(|b| b.confidence).sum::<f32>() / boxes.len() as f32;
            Some((mean * 100.0).clamp(0.0, 100.0))
        };

        let text = boxes
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            text,
            confidence,
            boxes,
        }
    }
}
