//! Crop disease detection.
//!
//! Detection sits behind the [`DiseaseClassifier`] capability. The shipped
//! implementation is [`SimulatedClassifier`], which returns a fixed diagnosis
//! after a delay.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Errors from validating or classifying an upload.
#[derive(Debug, Error)]
pub enum DiagnosisError {
    #[error("Empty file")]
    Empty,

    #[error("Unsupported file type: {0}")]
    NotImage(String),

    #[error("File exceeds {max} bytes")]
    TooLarge { max: usize },

    #[error("classifier failed: {0}")]
    Classifier(String),
}

/// Outcome of classifying one image.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisResult {
    pub disease: String,
    /// Between 0 and 1.
    pub confidence: f32,
    pub treatment: String,
}

impl DiagnosisResult {
    #[must_use]
    pub fn confidence_percent(&self) -> u8 {
        percent(self.confidence)
    }
}

/// Confidence in 0..=1 as a rounded percentage.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn percent(confidence: f32) -> u8 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Check an upload before it reaches a classifier.
///
/// # Errors
///
/// Returns `Empty` for zero bytes, `TooLarge` above [`MAX_UPLOAD_BYTES`] and
/// `NotImage` unless the content type is `image/*`.
pub fn validate_upload(bytes: &[u8], content_type: Option<&str>) -> Result<(), DiagnosisError> {
    if bytes.is_empty() {
        return Err(DiagnosisError::Empty);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(DiagnosisError::TooLarge {
            max: MAX_UPLOAD_BYTES,
        });
    }

    match content_type {
        Some(ct) if ct.starts_with("image/") => Ok(()),
        other => Err(DiagnosisError::NotImage(
            other.unwrap_or("unknown").to_string(),
        )),
    }
}

/// Something that can diagnose a crop image.
#[async_trait]
pub trait DiseaseClassifier: Send + Sync {
    /// Classify an image.
    ///
    /// # Errors
    ///
    /// Returns `DiagnosisError::Empty` for an empty image, or a classifier
    /// error.
    async fn classify_image(&self, bytes: &[u8]) -> Result<DiagnosisResult, DiagnosisError>;
}

/// Stand-in classifier with a canned answer.
#[derive(Debug, Clone)]
pub struct SimulatedClassifier {
    delay: Duration,
}

impl SimulatedClassifier {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl DiseaseClassifier for SimulatedClassifier {
    async fn classify_image(&self, bytes: &[u8]) -> Result<DiagnosisResult, DiagnosisError> {
        if bytes.is_empty() {
            return Err(DiagnosisError::Empty);
        }

        tokio::time::sleep(self.delay).await;
        tracing::debug!(bytes = bytes.len(), "Simulated classification complete");

        Ok(DiagnosisResult {
            disease: "Leaf Blight".to_string(),
            confidence: 0.92,
            treatment: "Remove infected leaves and apply a copper-based fungicide. \
                        Avoid overhead irrigation and keep spacing for airflow."
                .to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_upload() {
        assert!(validate_upload(b"\x89PNG", Some("image/png")).is_ok());
        assert!(matches!(
            validate_upload(b"", Some("image/png")),
            Err(DiagnosisError::Empty)
        ));
        assert!(matches!(
            validate_upload(b"hello", Some("text/plain")),
            Err(DiagnosisError::NotImage(_))
        ));
        assert!(matches!(
            validate_upload(b"hello", None),
            Err(DiagnosisError::NotImage(_))
        ));
    }

    #[test]
    fn test_empty_error_message() {
        assert_eq!(DiagnosisError::Empty.to_string(), "Empty file");
    }

    #[test]
    fn test_percent_rounds() {
        assert_eq!(percent(0.92), 92);
        assert_eq!(percent(0.926), 93);
        assert_eq!(percent(1.5), 100);
    }

    #[tokio::test]
    async fn test_simulated_classifier() {
        let classifier = SimulatedClassifier::new(Duration::ZERO);
        let result = classifier.classify_image(b"leaf").await.unwrap();
        assert_eq!(result.disease, "Leaf Blight");
        assert_eq!(result.confidence_percent(), 92);
        assert!(!result.treatment.is_empty());
    }

    #[tokio::test]
    async fn test_simulated_classifier_rejects_empty() {
        let classifier = SimulatedClassifier::new(Duration::ZERO);
        assert!(matches!(
            classifier.classify_image(&[]).await,
            Err(DiagnosisError::Empty)
        ));
    }
}
