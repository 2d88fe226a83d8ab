use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppError,
    models::user::{RequestHeaders, UserDetailResponse},
    store::StoreError,
    AppState,
};

/// Same-user lookup gated on the caller's own `x-auth-uid` header.
pub async fn get_user_details(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: RequestHeaders,
) -> Result<Json<UserDetailResponse>, AppError> {
    if headers.uid != user_id {
        tracing::info!(header_uid = %headers.uid, path_id = %user_id, "user id mismatch");
        return Err(AppError::Unauthorized("User ID mismatch".to_string()));
    }

    // A non-numeric id can never match a stored row.
    let id: i64 = user_id.parse().map_err(|_| StoreError::NotFound)?;

    let user = state.store.find_by_id(id).await?;

    Ok(Json(UserDetailResponse::new(user, headers)))
}
