use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::warn;

use crate::utils::post::check_new_post_data;
use crate::{
    extractors::auth_extractor::AuthUser,
    utils::app_error::AppError,
    AppState,
};

#[derive(serde::Deserialize)]
pub struct NewPost {
    pub content: String,
}

pub async fn publish_post_route(
    State(app_state): State<Arc<AppState>>,
    AuthUser(auth_user): AuthUser,
    Json(post): Json<NewPost>,
) -> Result<String, AppError> {
    let Some(auth_user) = auth_user else {
        warn!("User not connected");
        return Err(AppError::you_have_to_be_connected_to_perform_this_action_error());
    };

    let content = post.content.trim();

    check_new_post_data(auth_user.id, content)?;

    let post_id = match sqlx::query_scalar::<_, i64>(
        "INSERT INTO posts (author_id, content) VALUES ($1, $2) RETURNING id",
    )
    .bind(auth_user.id)
    .bind(content)
    .fetch_one(&app_state.pool)
    .await
    {
        Ok(post_id) => post_id,
        Err(e) => {
            warn!("Error inserting post with author {} : {e}", auth_user.id);
            return Err(AppError::internal_server_error());
        }
    };

    Ok(post_id.to_string())
}
