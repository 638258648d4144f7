use std::sync::Arc;

use axum::{extract::State, Json};
use hyper::StatusCode;
use tracing::warn;

use crate::{
    extractors::auth_extractor::AuthUser,
    structs::edit_profile::EditProfile,
    utils::{
        app_error::AppError,
        register::{check_biography, check_username},
    },
    AppState,
};

pub async fn edit_profile_route(
    State(app_state): State<Arc<AppState>>,
    AuthUser(auth_user): AuthUser,
    Json(edit_profile): Json<EditProfile>,
) -> Result<StatusCode, AppError> {
    let Some(auth_user) = auth_user else {
        warn!("User not connected");
        return Err(AppError::you_have_to_be_connected_to_perform_this_action_error());
    };

    if edit_profile.username.is_none() && edit_profile.biography.is_none() {
        warn!("User {} sent an empty profile edit", auth_user.id);
        return Err(AppError::forbidden_error(Some(
            "Aucune modification demandée.",
        )));
    }

    let username = match edit_profile.username {
        Some(username) => {
            let username = username.to_lowercase();
            check_username(&username)?;

            //Check if username is already used by somebody else
            if match sqlx::query_scalar::<_, i64>(
                "SELECT id FROM users WHERE username = $1 AND id <> $2",
            )
            .bind(&username)
            .bind(auth_user.id)
            .fetch_optional(&app_state.pool)
            .await
            {
                Ok(result) => result,
                Err(e) => {
                    warn!("Error while checking if username already exists : {}", e);
                    return Err(AppError::internal_server_error());
                }
            }
            .is_some()
            {
                warn!("Username `{username}` already used");
                return Err(AppError::forbidden_error(Some("Pseudo déjà utilisé.")));
            };

            Some(username)
        }
        None => None,
    };

    if let Some(biography) = &edit_profile.biography {
        check_biography(biography)?;
    }

    if let Err(e) = sqlx::query(
        "UPDATE users SET username = COALESCE($1, username), biography = COALESCE($2, biography), updated_at = NOW() WHERE id = $3",
    )
    .bind(&username)
    .bind(&edit_profile.biography)
    .bind(auth_user.id)
    .execute(&app_state.pool)
    .await
    {
        warn!("Error updating profile of user {} : {e}", auth_user.id);
        return Err(AppError::internal_server_error());
    }

    Ok(StatusCode::OK)
}
