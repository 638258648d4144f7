use std::sync::Arc;

use axum::extract::{Path, State};
use hyper::StatusCode;
use tracing::{info, warn};

use crate::{extractors::auth_extractor::AuthUser, utils::app_error::AppError, AppState};

pub async fn follow_user_route(
    State(app_state): State<Arc<AppState>>,
    AuthUser(auth_user): AuthUser,
    Path(username): Path<String>,
) -> Result<StatusCode, AppError> {
    let Some(auth_user) = auth_user else {
        warn!("User not connected");
        return Err(AppError::you_have_to_be_connected_to_perform_this_action_error());
    };

    let username = username.to_lowercase();

    let followed_id = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM users WHERE username = $1 AND is_banned = FALSE",
    )
    .bind(&username)
    .fetch_optional(&app_state.pool)
    .await
    .map_err(|e| {
        warn!("Error getting user @{username} from database : {e}");
        AppError::internal_server_error()
    })?;

    let Some(followed_id) = followed_id else {
        warn!(
            "User {} tried to follow unknown user @{username}",
            auth_user.id
        );
        return Err(AppError::not_found_error(Some("Utilisateur introuvable.")));
    };

    if followed_id == auth_user.id {
        warn!("User {} tried to follow themselves", auth_user.id);
        return Err(AppError::forbidden_error(Some(
            "Vous ne pouvez pas vous suivre vous-même.",
        )));
    }

    // Already following is not an error
    if let Err(e) = sqlx::query(
        "INSERT INTO followers (follower_id, followed_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(auth_user.id)
    .bind(followed_id)
    .execute(&app_state.pool)
    .await
    {
        warn!(
            "Error inserting follow of user {followed_id} by user {} : {e}",
            auth_user.id
        );
        return Err(AppError::internal_server_error());
    }

    info!("@{} now follows @{username}", auth_user.username);

    Ok(StatusCode::OK)
}
