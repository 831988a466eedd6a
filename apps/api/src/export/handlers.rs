//! Axum route handlers for the Export API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::export::surface::EncodedSurface;
use crate::models::resume::PersonalInfo;
use crate::state::AppState;

/// POST /api/v1/export
///
/// Multipart fields:
/// - `surface`  : the rendered preview as an encoded image (optional; absence is a capture error)
/// - `firstName`: used for the file name
/// - `lastName` : used for the file name
///
/// Responds with the PDF as an attachment named `{firstName}_{lastName}_Resume.pdf`.
pub async fn handle_export(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut surface: Option<Bytes> = None;
    let mut owner = PersonalInfo::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "surface" => {
                surface = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("unreadable surface: {e}")))?,
                );
            }
            "firstName" | "lastName" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable {name}: {e}")))?;
                if name == "firstName" {
                    owner.first_name = value;
                } else {
                    owner.last_name = value;
                }
            }
            _ => {}
        }
    }

    let identity = owner.document_identity();
    let document = state
        .exporter
        .export(&EncodedSurface::new(surface), &identity)
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", document.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}
