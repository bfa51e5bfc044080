use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::bulk::{self, Entity, ImportOptions, ImportReport};
use crate::error::Result;
use crate::AppState;

/// Bulk import: `POST /api/import/:entity` with a CSV body
///
/// Returns how many rows were inserted and how many were skipped. A header
/// row lacking required columns is rejected with 400 and nothing is written.
pub async fn import_entity(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    body: Bytes,
) -> Result<Json<ImportReport>> {
    let entity: Entity = entity.parse()?;
    let options = ImportOptions {
        enforce_capacity: state.config.enforce_capacity_on_import,
    };

    let report = bulk::import_csv(&state.engine, entity, &body, options).await?;
    Ok(Json(report))
}

/// Bulk export: `GET /api/export/:entity` as a CSV attachment
pub async fn export_entity(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> Result<impl IntoResponse> {
    let entity: Entity = entity.parse()?;
    let csv = bulk::export_csv(&state.store, entity).await?;

    let filename = format!("{}-{}.csv", entity, Utc::now().format("%Y%m%dT%H%M%SZ"));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}
