//! Document ingestion, listing, prefill, and review routes.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use boekhoud_core::document::{
    DocumentKind, DocumentStatus, FinancialDocument, IngestOutcome, UploadedFile,
};
use boekhoud_core::review::{ReviewAction, ReviewForm, ReviewService};
use boekhoud_shared::types::DocumentId;

use crate::error::ApiError;
use crate::middleware::AdminUser;
use crate::AppState;

/// Creates the document routes (requires the admin gate to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", post(ingest_documents).get(list_documents))
        .route("/documents/{id}", get(get_document))
        .route("/documents/{id}/prefill", post(prefill_review_form))
        .route("/documents/{id}/review", post(review_document))
        // Uploads may exceed axum's default 2MB body cap
        .layer(DefaultBodyLimit::max(25 * 1024 * 1024))
}

/// Query parameters for listing documents.
#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Optional status filter: needs_review, approved, or rejected.
    status: Option<String>,
}

/// Per-file entry of the ingestion response.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum IngestResult {
    /// File stored and record created.
    Created {
        /// The created document.
        document: FinancialDocument,
    },
    /// This file failed; retry it individually.
    Failed {
        /// Original filename of the failed upload.
        filename: String,
        /// Stable error code.
        error: &'static str,
        /// Human-readable message.
        message: String,
    },
}

/// Request body for resolving a review.
#[derive(Debug, Deserialize)]
struct ReviewRequest {
    /// `approve` or `reject`.
    action: String,
    /// The submitted review form.
    #[serde(flatten)]
    form: ReviewForm,
}

/// POST `/documents` - Ingest one or more uploaded files.
///
/// Multipart body: a `kind` text field plus one or more `file` parts. Each
/// file is ingested independently; the response carries one entry per file
/// so the caller can retry failures individually.
async fn ingest_documents(
    State(state): State<AppState>,
    admin: AdminUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut kind: Option<DocumentKind> = None;
    let mut files: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("kind") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("unreadable kind field: {e}")))?;
                kind = Some(DocumentKind::parse(&value).ok_or_else(|| {
                    ApiError::bad_request(format!("unknown document kind '{value}'"))
                })?);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("unreadable file part: {e}")))?;
                files.push(UploadedFile {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let kind = kind.ok_or_else(|| ApiError::bad_request("missing kind field"))?;

    let outcomes = state.documents.ingest(kind, files).await?;
    state.store.invalidate().await;

    info!(
        uploaded_by = %admin.user_id(),
        kind = %kind,
        count = outcomes.len(),
        "ingestion batch processed"
    );

    let results: Vec<IngestResult> = outcomes
        .into_iter()
        .map(|outcome| match outcome {
            IngestOutcome::Created(document) => IngestResult::Created { document },
            IngestOutcome::Failed { filename, error } => IngestResult::Failed {
                filename,
                error: error.error_code(),
                message: error.to_string(),
            },
        })
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "results": results })),
    ))
}

/// GET `/documents` - List documents, optionally filtered by status.
async fn list_documents(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let documents = match query.status.as_deref() {
        Some(raw) => {
            let status = DocumentStatus::parse(raw)
                .ok_or_else(|| ApiError::bad_request(format!("unknown status '{raw}'")))?;
            state.documents.list_by_status(status).await?
        }
        None => state.documents.list_all().await?,
    };

    Ok(Json(serde_json::json!({ "documents": documents })))
}

/// GET `/documents/{id}` - Fetch a single document.
async fn get_document(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state.documents.get(DocumentId::from_uuid(id)).await?;
    Ok(Json(document))
}

/// POST `/documents/{id}/prefill` - Merge an extraction guess into the form.
///
/// Body: the review form as currently filled by the operator. The extraction
/// service is asked about the document's stored file; fields the operator
/// already typed are never overwritten. Extraction failure is silent; the
/// form comes back unchanged.
async fn prefill_review_form(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(mut form): Json<ReviewForm>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state.documents.get(DocumentId::from_uuid(id)).await?;

    if let Some(file_url) = document.file_url.as_deref() {
        let guess = state.extraction.guess(file_url).await;
        guess.merge_into(&mut form);
    }

    Ok(Json(form))
}

/// POST `/documents/{id}/review` - Approve or reject a document.
///
/// The document keeps its prior status until the update persists, so a
/// failed save is retried by re-submitting the same action.
async fn review_document(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<ReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let action = ReviewAction::parse(&request.action)
        .ok_or_else(|| ApiError::bad_request(format!("unknown action '{}'", request.action)))?;

    let id = DocumentId::from_uuid(id);
    let document = state.documents.get(id).await?;
    let update = ReviewService::resolve(&document, &request.form, action)?;
    let saved = state.documents.apply_review(id, update).await?;
    state.store.invalidate().await;

    info!(
        document_id = %id,
        resolved_by = %admin.user_id(),
        action = %action,
        "document review resolved"
    );

    Ok(Json(saved))
}
