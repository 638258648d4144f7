use std::sync::Arc;

use axum::extract::State;
use hyper::StatusCode;
use tracing::warn;

use crate::{
    utils::{app_error::AppError, token::Token},
    AppState,
};

pub async fn email_confirm_route(
    State(app_state): State<Arc<AppState>>,
    body: String,
) -> Result<StatusCode, AppError> {
    if body.is_empty() {
        warn!("POST /register/email_confirm Token missing");
        return Err(AppError::forbidden_error(Some("Token manquant.")));
    }

    let token = match urlencoding::decode(&body) {
        Ok(token) => token,
        Err(e) => {
            warn!("POST /register/email_confirm Error while decoding token : {e}");
            return Err(AppError::forbidden_error(Some("Token invalide.")));
        }
    }
    .to_string();

    let email = Token::decode(&token, &app_state.cipher)?;

    let confirmed_user_id = sqlx::query_scalar::<_, i64>(
        "UPDATE users SET email_verified = TRUE, updated_at = NOW() WHERE email = $1 AND email_verified = FALSE RETURNING id",
    )
    .bind(&email)
    .fetch_optional(&app_state.pool)
    .await
    .map_err(|e| {
        warn!("Error while verifying account with email `{email}` : {e}");
        AppError::internal_server_error()
    })?;

    if confirmed_user_id.is_none() {
        warn!("No account waiting for confirmation with email `{email}`");
        return Err(AppError::forbidden_error(Some("Token invalide.")));
    }

    Ok(StatusCode::OK)
}
