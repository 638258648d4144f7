use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Duration;
use hyper::StatusCode;
use lettre::Address;
use tracing::warn;

use crate::structs::reset_password::{ResetPasswordConfirm, ResetPasswordRequest};
use crate::utils::app_error::AppError;
use crate::utils::register::{check_email_address, hash_password, send_html_message};
use crate::utils::token::{generate_session_token, Token};
use crate::AppState;
use crate::FRONT_URL;

#[derive(sqlx::FromRow)]
struct UserForReset {
    id: i64,
    username: String,
}

pub async fn reset_password_route(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    let email = request.email.to_lowercase();
    check_email_address(&email)?;

    let user = sqlx::query_as::<_, UserForReset>(
        "SELECT id, username FROM users WHERE email = $1 AND is_banned = FALSE",
    )
    .bind(&email)
    .fetch_optional(&app_state.pool)
    .await
    .map_err(|e| {
        warn!("Error getting user with email `{email}` from database : {e}");
        AppError::internal_server_error()
    })?;

    // Same answer whether the account exists or not
    let Some(user) = user else {
        warn!("Password reset requested for unknown email `{email}`");
        return Ok(StatusCode::OK);
    };

    let address = match email.parse::<Address>() {
        Ok(address) => address,
        Err(e) => {
            warn!("Cannot parse email `{email}` : {e}");
            return Err(AppError::forbidden_error(Some("L'email est invalide.")));
        }
    };

    let reset_token = Token::create(user.id.to_string(), Duration::minutes(10), &app_state.cipher);
    let reset_token = urlencoding::encode(&reset_token).to_string();

    send_html_message(
        &app_state.smtp_client,
        "Réinitialisation du mot de passe",
        &format!("<p>Bonjour <b>@{}</b> ! Quelqu'un a demandé la réinitialisation du mot de passe de votre compte, si vous êtes à l’origine de cette action, cliquez <a href='{}/reset_password?token={}'>ici</a> pour choisir un nouveau mot de passe, sinon vous pouvez ignorer cet email.</p>", user.username, FRONT_URL, reset_token),
        address,
    )?;

    Ok(StatusCode::OK)
}

pub async fn reset_password_confirm_route(
    State(app_state): State<Arc<AppState>>,
    Json(confirm): Json<ResetPasswordConfirm>,
) -> Result<StatusCode, AppError> {
    let token = match urlencoding::decode(&confirm.token) {
        Ok(token) => token,
        Err(e) => {
            warn!("POST /reset_password/confirm Error while decoding token : {e}");
            return Err(AppError::forbidden_error(Some("Token invalide.")));
        }
    }
    .to_string();

    let user_id = Token::decode(&token, &app_state.cipher)?
        .parse::<i64>()
        .map_err(|e| {
            warn!("Invalid subject in password reset token : {e}");
            AppError::forbidden_error(Some("Token invalide."))
        })?;

    if confirm.password.len() < 8 {
        warn!(
            "User {user_id} tried to reset their password with a too short one : {} characters",
            confirm.password.len()
        );
        return Err(AppError::forbidden_error(Some("Mot de passe trop court.")));
    }

    let password = hash_password(&confirm.password);
    // Rotating the session token logs every device out
    let session_token = generate_session_token();

    let result = sqlx::query(
        "UPDATE users SET password = $1, token = $2, updated_at = NOW() WHERE id = $3",
    )
    .bind(&password)
    .bind(&session_token)
    .bind(user_id)
    .execute(&app_state.pool)
    .await
    .map_err(|e| {
        warn!("Error resetting password of user {user_id} : {e}");
        AppError::internal_server_error()
    })?;

    if result.rows_affected() == 0 {
        warn!("Password reset for unknown user {user_id}");
        return Err(AppError::forbidden_error(Some("Token invalide.")));
    }

    Ok(StatusCode::OK)
}
