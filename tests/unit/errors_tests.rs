/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use scriptmark::errors::{AppError, RowError, SpeakerTableError};

#[test]
fn test_speakerTableError_notFound_shouldNameExpectedLocation() {
    let error = SpeakerTableError::NotFound { path: PathBuf::from("/opt/tool/speakers.csv") };
    let display = format!("{}", error);
    assert!(display.contains("/opt/tool/speakers.csv"));
    assert!(display.contains("--speakers"));
}

#[test]
fn test_rowError_invalidLength_shouldDisplayNameAndValue() {
    let error = RowError::InvalidLength { name: "エマ".to_string(), value: "abc".to_string() };
    let display = format!("{}", error);
    assert!(display.contains("エマ"));
    assert!(display.contains("abc"));
}

#[test]
fn test_appError_fromSpeakerTableError_shouldWrapCorrectly() {
    let error: AppError = SpeakerTableError::MissingColumns {
        path: PathBuf::from("speakers.csv"),
        columns: "length".to_string(),
    }
    .into();

    assert!(matches!(error, AppError::SpeakerTable(SpeakerTableError::MissingColumns { .. })));
    assert!(error.to_string().contains("length"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(ref message) if message.contains("denied")));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(error, AppError::Unknown(ref message) if message == "boom"));
}
