use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    error::AppError,
    models::user::{LoginRequest, LoginResponse, User},
    store::StoreError,
    AppState,
};

/// First login for an unseen email registers it; later logins must present
/// the stored password.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) = payload?;

    let (user, created) = find_or_create(&state, &payload).await?;

    if !created && user.password != payload.password {
        tracing::warn!(user_id = user.id, "invalid password");
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    let access_token = state.issuer.issue(&user)?;

    Ok(Json(LoginResponse { access_token }))
}

async fn find_or_create(
    state: &AppState,
    payload: &LoginRequest,
) -> Result<(User, bool), AppError> {
    match state.store.find_by_email(&payload.email).await {
        Ok(user) => Ok((user, false)),
        Err(StoreError::NotFound) => {
            tracing::info!(email = %payload.email, "user not found, creating new user");
            let user = state
                .store
                .create(&payload.email, &payload.password)
                .await
                .map_err(|e| {
                    tracing::error!("Error creating user: {}", e);
                    AppError::Internal
                })?;
            Ok((user, true))
        }
        Err(e) => {
            tracing::error!("Error getting user by email: {}", e);
            Err(AppError::Internal)
        }
    }
}
