//! End-to-end tests of the upload lifecycle with stub engines.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use docintake_core::error::{ExtractionError, IntakeError, OcrError};
use docintake_core::ocr::{OcrBackend, Recognition};
use docintake_core::pdf::PdfTextLayer;
use docintake_core::{
    IncomingFile, IntakeConfig, LopdfTextLayer, ScanResponse, TextSource, UploadLifecycleManager,
};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pretty_assertions::assert_eq;

/// PDF layer returning fixed text and counting calls.
struct StubPdf {
    text: &'static str,
    calls: AtomicUsize,
}

impl StubPdf {
    fn new(text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            text,
            calls: AtomicUsize::new(0),
        })
    }
}

impl PdfTextLayer for StubPdf {
    fn extract_text(&self, _data: &[u8]) -> docintake_core::pdf::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.to_string())
    }
}

enum OcrBehavior {
    Text(&'static str, Option<f32>),
    Fail,
    Sleep(Duration),
    Panic,
}

/// OCR engine with scripted behavior, recording the staged path it saw.
struct StubOcr {
    behavior: OcrBehavior,
    calls: AtomicUsize,
    seen: std::sync::Mutex<Vec<std::path::PathBuf>>,
}

impl StubOcr {
    fn new(behavior: OcrBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            seen: std::sync::Mutex::new(Vec::new()),
        })
    }
}

impl OcrBackend for StubOcr {
    fn recognize(&self, path: &Path, _languages: &[String]) -> docintake_core::ocr::Result<Recognition> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(path.exists(), "engine must see the staged file");
        self.seen.lock().unwrap().push(path.to_path_buf());

        match &self.behavior {
            OcrBehavior::Text(text, confidence) => Ok(Recognition {
                text: text.to_string(),
                confidence: *confidence,
                boxes: Vec::new(),
            }),
            OcrBehavior::Fail => Err(OcrError::Recognition("engine crashed".to_string())),
            OcrBehavior::Sleep(duration) => {
                std::thread::sleep(*duration);
                Ok(Recognition::default())
            }
            OcrBehavior::Panic => panic!("engine panicked"),
        }
    }
}

fn config(scratch: &Path) -> IntakeConfig {
    let mut config = IntakeConfig::default();
    config.upload.scratch_dir = scratch.to_path_buf();
    config
}

fn scratch_is_empty(scratch: &Path) -> bool {
    !scratch.exists() || std::fs::read_dir(scratch).unwrap().next().is_none()
}

fn png(data: &[u8]) -> Vec<IncomingFile> {
    vec![IncomingFile::new("id.png", "image/png", data.to_vec())]
}

/// Single-page PDF whose text layer holds `lines`.
fn text_pdf(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 14.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
    ];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            operations.push(Operation::new("Td", vec![0.into(), (-24).into()]));
        }
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

#[tokio::test]
async fn test_pdf_text_layer_end_to_end() {
    let scratch = tempfile::tempdir().unwrap();
    let source = TextSource::new(Arc::new(LopdfTextLayer::new()), StubOcr::new(OcrBehavior::Fail));
    let manager = UploadLifecycleManager::new(source, &config(scratch.path()));

    let pdf = text_pdf(&["Nom: DUPONT", "Prenoms: Jean Pierre", "Ne le 12/05/1998"]);
    let files = vec![IncomingFile::new("card.pdf", "application/pdf", pdf)];

    let result = manager.process(files).await.unwrap();

    assert_eq!(result.surname.as_deref(), Some("DUPONT"));
    assert_eq!(result.given_names.as_deref(), Some("JEAN PIERRE"));
    assert_eq!(result.birth_date.as_deref(), Some("1998-05-12"));
    assert_eq!(result.confidence, 95.0);
    assert!(result.success);
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn test_image_uses_engine_confidence() {
    let scratch = tempfile::tempdir().unwrap();
    let ocr = StubOcr::new(OcrBehavior::Text("prénom: Marie", Some(72.5)));
    let manager = UploadLifecycleManager::new(
        TextSource::new(StubPdf::new(""), ocr.clone()),
        &config(scratch.path()),
    );

    let result = manager.process(png(b"img")).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.given_names.as_deref(), Some("MARIE"));
    assert_eq!(result.confidence, 72.5);
    assert_eq!(
        result.errors,
        vec!["Surname not detected".to_string(), "Birth date not detected".to_string()]
    );

    let seen = ocr.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].starts_with(scratch.path()));
    assert!(!seen[0].exists());
}

#[tokio::test]
async fn test_missing_engine_confidence_is_zero() {
    let scratch = tempfile::tempdir().unwrap();
    let manager = UploadLifecycleManager::new(
        TextSource::new(StubPdf::new(""), StubOcr::new(OcrBehavior::Text("DUPONT Jean 12/05/1998", None))),
        &config(scratch.path()),
    );

    let result = manager.process(png(b"img")).await.unwrap();
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.surname, None);
    assert_eq!(result.given_names.as_deref(), Some("JEAN"));
    assert_eq!(result.birth_date.as_deref(), Some("1998-05-12"));
}

#[tokio::test]
async fn test_plain_text_rejected_without_engine_call() {
    let scratch = tempfile::tempdir().unwrap();
    let pdf = StubPdf::new("Nom: DUPONT");
    let ocr = StubOcr::new(OcrBehavior::Text("Nom: DUPONT", Some(90.0)));
    let manager = UploadLifecycleManager::new(
        TextSource::new(pdf.clone(), ocr.clone()),
        &config(&scratch.path().join("uploads")),
    );

    let files = vec![IncomingFile::new("notes.txt", "text/plain", b"Nom: DUPONT".to_vec())];
    let err = manager.process(files).await.unwrap_err();

    assert!(matches!(err, IntakeError::UnsupportedFormat(_)));
    assert_eq!(ScanResponse::from_error(&err).http_status(), 415);
    assert_eq!(pdf.calls.load(Ordering::SeqCst), 0);
    assert_eq!(ocr.calls.load(Ordering::SeqCst), 0);
    assert!(!scratch.path().join("uploads").exists());
}

#[tokio::test]
async fn test_oversized_and_missing_uploads() {
    let scratch = tempfile::tempdir().unwrap();
    let mut config = config(scratch.path());
    config.upload.max_file_size = 8;
    let ocr = StubOcr::new(OcrBehavior::Text("", None));
    let manager = UploadLifecycleManager::new(TextSource::new(StubPdf::new(""), ocr.clone()), &config);

    let err = manager.process(png(&[0; 9])).await.unwrap_err();
    assert!(matches!(err, IntakeError::FileTooLarge { size: 9, limit: 8 }));
    assert_eq!(ScanResponse::from_error(&err).http_status(), 413);

    let err = manager.process(Vec::new()).await.unwrap_err();
    assert!(matches!(err, IntakeError::NoFile));
    assert_eq!(ScanResponse::from_error(&err).http_status(), 400);

    assert_eq!(ocr.calls.load(Ordering::SeqCst), 0);
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn test_engine_error_is_fatal_and_cleans_up() {
    let scratch = tempfile::tempdir().unwrap();
    let manager = UploadLifecycleManager::new(
        TextSource::new(StubPdf::new(""), StubOcr::new(OcrBehavior::Fail)),
        &config(scratch.path()),
    );

    let err = manager.process(png(b"img")).await.unwrap_err();

    assert!(matches!(
        err,
        IntakeError::Extraction(ExtractionError::Ocr(OcrError::Recognition(_)))
    ));
    assert_eq!(ScanResponse::from_error(&err).http_status(), 500);
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn test_engine_panic_cleans_up() {
    let scratch = tempfile::tempdir().unwrap();
    let manager = UploadLifecycleManager::new(
        TextSource::new(StubPdf::new(""), StubOcr::new(OcrBehavior::Panic)),
        &config(scratch.path()),
    );

    let err = manager.process(png(b"img")).await.unwrap_err();

    assert!(matches!(err, IntakeError::Extraction(ExtractionError::Worker(_))));
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn test_timeout_cleans_up() {
    let scratch = tempfile::tempdir().unwrap();
    let mut config = config(scratch.path());
    config.upload.engine_timeout_secs = 1;
    let manager = UploadLifecycleManager::new(
        TextSource::new(StubPdf::new(""), StubOcr::new(OcrBehavior::Sleep(Duration::from_secs(2)))),
        &config,
    );

    let err = manager.process(png(b"img")).await.unwrap_err();

    assert!(matches!(err, IntakeError::Extraction(ExtractionError::Timeout(_))));
    assert_eq!(ScanResponse::from_error(&err).http_status(), 504);
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_new_scratch_dir() {
    let root = tempfile::tempdir().unwrap();
    let scratch = root.path().join("nested").join("uploads");
    let manager = UploadLifecycleManager::new(
        TextSource::new(
            StubPdf::new("Nom: DUPONT\nPrénoms: Jean\nNé le 1/2/1990"),
            StubOcr::new(OcrBehavior::Text("", None)),
        ),
        &config(&scratch),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let manager = manager.clone();
            tokio::spawn(async move {
                let files = vec![IncomingFile::new(format!("{}.pdf", i), "application/pdf", vec![0; 16])];
                manager.process(files).await
            })
        })
        .collect();

    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.birth_date.as_deref(), Some("1990-02-01"));
    }

    assert!(scratch.exists());
    assert!(scratch_is_empty(&scratch));
}
