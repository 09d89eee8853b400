//! File uploads into object storage and serving of stored objects.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum_extra::extract::Multipart;
use campus_storage::{Bucket, content_type_for};

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::SharedState;

/// Most files accepted in one upload request.
pub const MAX_FILES_PER_UPLOAD: usize = 10;

/// Store every file part under `{bucket}/{user id}/` and return the public
/// URLs in the order the parts arrived.
pub async fn upload_handler(
    State(state): State<SharedState>,
    user: CurrentUser,
    Path(bucket): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let bucket: Bucket = bucket.parse()?;

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if files.len() == MAX_FILES_PER_UPLOAD {
            return Err(ApiError::BadRequest(format!(
                "at most {MAX_FILES_PER_UPLOAD} files per upload"
            )));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read file: {e}")))?;
        files.push((file_name, bytes.to_vec()));
    }
    if files.is_empty() {
        return Err(ApiError::BadRequest("no file provided".into()));
    }

    let urls = state.storage.upload_many(bucket, user.id(), files).await?;
    tracing::info!(%bucket, user_id = %user.id(), count = urls.len(), "files uploaded");
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "urls": urls }))))
}

/// Public read of a stored object. No session needed: URLs are shareable.
pub async fn serve_object_handler(
    State(state): State<SharedState>,
    Path((bucket, path)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let bucket: Bucket = bucket.parse()?;
    let bytes = state.storage.get(bucket, &path).await?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&path))], bytes))
}
