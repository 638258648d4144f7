use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::warn;

use crate::{
    extractors::auth_extractor::AuthUser,
    structs::{
        pagination::PaginationParams,
        post::{PostWithAuthorRow, PublicPost},
    },
    utils::app_error::AppError,
    AppState,
};

const FOLLOWED_POSTS_QUERY: &str = include_str!("../queries/followed_posts.sql");

/// Explore page : every post, newest first
pub async fn get_posts_route(
    State(app_state): State<Arc<AppState>>,
    Query(pagination_params): Query<PaginationParams>,
) -> Result<Json<Vec<PublicPost>>, AppError> {
    let posts = sqlx::query_as::<_, PostWithAuthorRow>(
        "SELECT posts.id, posts.content, posts.created_at, users.id AS author_id, users.username AS author_username
        FROM posts
        JOIN users ON users.id = posts.author_id
        WHERE users.is_banned = FALSE
        ORDER BY posts.created_at DESC
        LIMIT $1 OFFSET $2",
    )
    .bind(pagination_params.limit())
    .bind(pagination_params.offset())
    .fetch_all(&app_state.pool)
    .await
    .map_err(|e| {
        warn!("Error getting posts from database : {e}");
        AppError::internal_server_error()
    })?;

    Ok(Json(posts.into_iter().map(PublicPost::from).collect()))
}

/// Feed : the posts of the followed users plus our own, newest first
pub async fn get_followed_posts_route(
    State(app_state): State<Arc<AppState>>,
    AuthUser(auth_user): AuthUser,
    Query(pagination_params): Query<PaginationParams>,
) -> Result<Json<Vec<PublicPost>>, AppError> {
    let Some(auth_user) = auth_user else {
        warn!("User not connected");
        return Err(AppError::you_have_to_be_connected_to_perform_this_action_error());
    };

    let posts = sqlx::query_as::<_, PostWithAuthorRow>(FOLLOWED_POSTS_QUERY)
        .bind(auth_user.id)
        .bind(pagination_params.limit())
        .bind(pagination_params.offset())
        .fetch_all(&app_state.pool)
        .await
        .map_err(|e| {
            warn!(
                "Error getting followed posts of user {} from database : {e}",
                auth_user.id
            );
            AppError::internal_server_error()
        })?;

    Ok(Json(posts.into_iter().map(PublicPost::from).collect()))
}
