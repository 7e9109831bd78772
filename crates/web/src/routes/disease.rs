//! Disease detection upload.
//!
//! The uploaded leaf photo goes to the configured [`DiseaseClassifier`]; each
//! result is prepended to the session's detection history.
//!
//! [`DiseaseClassifier`]: crate::diagnosis::DiseaseClassifier

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use agrow_core::DetectionId;

use crate::diagnosis::{DiagnosisError, DiagnosisResult, MAX_UPLOAD_BYTES, validate_upload};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::PageContext;
use crate::models::{DetectionRecord, session_keys};
use crate::state::AppState;

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "disease_detection.html")]
pub struct DiseaseTemplate {
    pub ctx: PageContext,
    pub result: Option<DiagnosisResult>,
    pub file_name: String,
    pub error: Option<&'static str>,
    pub history: Vec<DetectionRecord>,
}

// =============================================================================
// History
// =============================================================================

async fn load_history(session: &Session) -> Result<Vec<DetectionRecord>> {
    Ok(session
        .get::<Vec<DetectionRecord>>(session_keys::DETECTIONS)
        .await?
        .unwrap_or_default())
}

/// Prepend `record`, keeping the newest [`DetectionRecord::HISTORY_LIMIT`].
fn push_record(history: &mut Vec<DetectionRecord>, record: DetectionRecord) {
    history.insert(0, record);
    history.truncate(DetectionRecord::HISTORY_LIMIT);
}

// =============================================================================
// Upload
// =============================================================================

struct Upload {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

fn multipart_error(err: &MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        DiagnosisError::TooLarge {
            max: MAX_UPLOAD_BYTES,
        }
        .into()
    } else {
        AppError::BadRequest(err.body_text())
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload> {
    let mut upload = Upload {
        file_name: String::new(),
        content_type: None,
        bytes: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        upload.file_name = field.file_name().unwrap_or_default().to_string();
        upload.content_type = field.content_type().map(str::to_string);
        upload.bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&e))?
            .to_vec();
    }

    Ok(upload)
}

const fn error_key(err: &DiagnosisError) -> Option<&'static str> {
    match err {
        DiagnosisError::Empty => Some("disease.error.empty"),
        DiagnosisError::NotImage(_) => Some("disease.error.notImage"),
        DiagnosisError::TooLarge { .. } => Some("disease.error.tooLarge"),
        DiagnosisError::Classifier(_) => None,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the upload form and recent detections.
pub async fn page(ctx: PageContext, session: Session) -> Result<impl IntoResponse> {
    Ok(DiseaseTemplate {
        ctx,
        result: None,
        file_name: String::new(),
        error: None,
        history: load_history(&session).await?,
    })
}

/// Classify an uploaded image.
#[instrument(skip_all)]
pub async fn detect(
    State(state): State<AppState>,
    ctx: PageContext,
    session: Session,
    multipart: Multipart,
) -> Result<Response> {
    let upload = read_upload(multipart).await?;
    let mut history = load_history(&session).await?;

    let outcome = match validate_upload(&upload.bytes, upload.content_type.as_deref()) {
        Ok(()) => state.classifier().classify_image(&upload.bytes).await,
        Err(err) => Err(err),
    };

    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            let Some(key) = error_key(&err) else {
                return Err(err.into());
            };
            tracing::info!(error = %err, file_name = %upload.file_name, "Upload rejected");
            let template = DiseaseTemplate {
                ctx,
                result: None,
                file_name: upload.file_name,
                error: Some(key),
                history,
            };
            return Ok((StatusCode::BAD_REQUEST, template).into_response());
        }
    };

    push_record(
        &mut history,
        DetectionRecord {
            id: DetectionId::new_v4(),
            file_name: upload.file_name.clone(),
            disease: result.disease.clone(),
            confidence: result.confidence,
            detected_at: Utc::now(),
        },
    );
    session.insert(session_keys::DETECTIONS, &history).await?;
    add_breadcrumb(
        "diagnosis",
        "Image classified",
        Some(&[("disease", result.disease.as_str())]),
    );

    Ok(DiseaseTemplate {
        ctx,
        result: Some(result),
        file_name: upload.file_name,
        error: None,
        history,
    }
    .into_response())
}
