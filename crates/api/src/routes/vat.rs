//! VAT period aggregation and export routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use boekhoud_core::document::AccountingBasis;
use boekhoud_core::export::ExportService;
use boekhoud_core::vat::{Period, VatService};

use crate::error::ApiError;
use crate::middleware::AdminUser;
use crate::AppState;

/// Creates the VAT routes (requires the admin gate to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vat/{year}/{quarter}", get(quarter_summary))
        .route("/vat/{year}/{quarter}/export", get(quarter_export))
}

/// Query parameters selecting the accounting basis.
#[derive(Debug, Deserialize)]
struct BasisQuery {
    /// `invoice` (default) or `booked`.
    basis: Option<String>,
}

impl BasisQuery {
    fn resolve(&self) -> Result<AccountingBasis, ApiError> {
        match self.basis.as_deref() {
            None => Ok(AccountingBasis::Invoice),
            Some(raw) => AccountingBasis::parse(raw)
                .ok_or_else(|| ApiError::bad_request(format!("unknown basis '{raw}'"))),
        }
    }
}

/// GET `/vat/{year}/{quarter}` - Quarter summary with rate breakdown.
///
/// Recomputed fresh from the document snapshot on every request.
async fn quarter_summary(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path((year, quarter)): Path<(i32, u8)>,
    Query(query): Query<BasisQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let period = Period::new(year, quarter)?;
    let basis = query.resolve()?;

    let snapshot = state.store.load().await?;
    let filtered = VatService::filter_period(&snapshot, &period, basis);
    let summary = VatService::summarize(&filtered);
    let rates = VatService::rate_breakdown(&filtered);

    Ok(Json(json!({
        "period": {
            "year": period.year,
            "quarter": period.quarter,
            "start": period.start,
            "end": period.end,
            "label": period.label(),
        },
        "basis": basis,
        "position": summary.position(),
        "summary": summary,
        "rates": rates,
        "documents": filtered,
    })))
}

/// GET `/vat/{year}/{quarter}/export` - CSV download of the quarter.
///
/// Responds 409 with a user-facing message when the filtered set is empty;
/// an empty export is never silently produced.
async fn quarter_export(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path((year, quarter)): Path<(i32, u8)>,
    Query(query): Query<BasisQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let period = Period::new(year, quarter)?;
    let basis = query.resolve()?;

    let snapshot = state.store.load().await?;
    let filtered = VatService::filter_period(&snapshot, &period, basis);
    let csv = ExportService::to_csv(&filtered)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        ExportService::filename(&period)
    );

    Ok((
        [
            (header::CONTENT_TYPE, boekhoud_core::export::CSV_MIME_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
