use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::db::queries;
use crate::errors::AppError;
use crate::services::receipt::render_receipt;
use crate::state::AppState;

// GET /api/receipts/:booking_id
pub async fn download_receipt(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<Response, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        queries::get_booking_by_id(&db, &booking_id)?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?
    };

    let pdf = render_receipt(&booking).map_err(|e| AppError::Validation(e.to_string()))?;
    let filename = format!("Receipt-{}.pdf", booking.id);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        pdf,
    )
        .into_response())
}
