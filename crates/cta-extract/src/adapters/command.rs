//! Shared helpers for adapters that shell out to poppler-utils and tesseract.

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;
use tokio::process::Command;

use cta_core::{Error, Result};

/// Reject uploads that cannot be a PDF before spawning any tool.
pub fn validate_pdf(data: &[u8]) -> Result<()> {
    if data.is_empty() {
        return Err(Error::InvalidInput(
            "Cannot extract text from empty PDF data".to_string(),
        ));
    }

    // Validate PDF magic bytes (%PDF)
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::InvalidInput(
            "Uploaded file is not a valid PDF (missing %PDF header)".to_string(),
        ));
    }

    Ok(())
}

/// Write bytes to a temporary file with the given suffix (tools read from paths).
pub(crate) fn write_temp_file(data: &[u8], suffix: &str) -> Result<NamedTempFile> {
    let mut tmpfile = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .map_err(|e| Error::Internal(format!("Failed to create temp file: {}", e)))?;
    tmpfile
        .write_all(data)
        .map_err(|e| Error::Internal(format!("Failed to write temp file: {}", e)))?;
    Ok(tmpfile)
}

/// Run a command with a timeout, returning stdout as a string.
pub(crate) async fn run_cmd_with_timeout(cmd: &mut Command, timeout_secs: u64) -> Result<String> {
    cmd.kill_on_drop(true);
    let output = tokio::time::timeout(Duration::from_secs(timeout_secs), cmd.output())
        .await
        .map_err(|_| {
            Error::Extraction(format!(
                "External command timed out after {}s",
                timeout_secs
            ))
        })?
        .map_err(|e| Error::Extraction(format!("Failed to execute command: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Extraction(format!(
            "Command failed (exit {}): {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Probe a binary by running it with a version flag.
///
/// poppler tools print their version to stderr and exit with 0 or 99
/// depending on the release. Both indicate the binary exists.
pub(crate) async fn binary_available(program: &str, version_flag: &str) -> bool {
    match Command::new(program).arg(version_flag).output().await {
        Ok(output) => output.status.success() || output.status.code() == Some(99),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pdf_empty() {
        let err = validate_pdf(b"").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_validate_pdf_missing_header() {
        let err = validate_pdf(b"PK\x03\x04 zip archive").unwrap_err();
        assert!(err.to_string().contains("not a valid PDF"));
    }

    #[test]
    fn test_validate_pdf_short_input() {
        assert!(validate_pdf(b"%PD").is_err());
    }

    #[test]
    fn test_validate_pdf_accepts_header() {
        assert!(validate_pdf(b"%PDF-1.7\n").is_ok());
    }

    #[test]
    fn test_write_temp_file_keeps_suffix() {
        let file = write_temp_file(b"%PDF-1.0", ".pdf").unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert!(path.ends_with(".pdf"));
        assert_eq!(std::fs::read(file.path()).unwrap(), b"%PDF-1.0");
    }

    #[tokio::test]
    async fn test_run_cmd_missing_binary_is_extraction_error() {
        let result = run_cmd_with_timeout(&mut Command::new("definitely-not-a-real-binary"), 5).await;
        assert!(matches!(result, Err(Error::Extraction(_))));
    }

    #[tokio::test]
    async fn test_binary_available_missing() {
        assert!(!binary_available("definitely-not-a-real-binary", "-v").await);
    }
}
