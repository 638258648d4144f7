use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::warn;

use crate::{
    extractors::auth_extractor::AuthUser,
    structs::{
        account::{ProfileRow, PublicProfile},
        pagination::PaginationParams,
        post::{PostWithAuthorRow, PublicPost},
    },
    utils::{app_error::AppError, register::avatar_url},
    AppState,
};

pub async fn get_profile_route(
    State(app_state): State<Arc<AppState>>,
    AuthUser(auth_user): AuthUser,
    Path(username): Path<String>,
) -> Result<Json<PublicProfile>, AppError> {
    let username = username.to_lowercase();

    let profile = sqlx::query_as::<_, ProfileRow>(
        "SELECT users.id, users.username, users.email, users.biography, users.created_at, users.last_seen,
            (SELECT COUNT(*) FROM followers WHERE followed_id = users.id) AS followers_count,
            (SELECT COUNT(*) FROM followers WHERE follower_id = users.id) AS following_count,
            EXISTS(SELECT 1 FROM followers WHERE follower_id = $2 AND followed_id = users.id) AS is_followed
        FROM users
        WHERE users.username = $1 AND users.is_banned = FALSE",
    )
    .bind(&username)
    .bind(auth_user.as_ref().map(|auth_user| auth_user.id))
    .fetch_optional(&app_state.pool)
    .await
    .map_err(|e| {
        warn!("Error getting profile of @{username} from database : {e}");
        AppError::internal_server_error()
    })?;

    let Some(profile) = profile else {
        warn!("Unknown user @{username}");
        return Err(AppError::not_found_error(Some("Utilisateur introuvable.")));
    };

    Ok(Json(PublicProfile {
        id: profile.id,
        username: profile.username,
        biography: profile.biography,
        avatar_url: avatar_url(&profile.email, 128),
        created_at: profile.created_at,
        last_seen: profile.last_seen,
        followers_count: profile.followers_count,
        following_count: profile.following_count,
        is_followed: profile.is_followed,
    }))
}

pub async fn get_user_posts_route(
    State(app_state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(pagination_params): Query<PaginationParams>,
) -> Result<Json<Vec<PublicPost>>, AppError> {
    let username = username.to_lowercase();

    let user_id = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM users WHERE username = $1 AND is_banned = FALSE",
    )
    .bind(&username)
    .fetch_optional(&app_state.pool)
    .await
    .map_err(|e| {
        warn!("Error getting user @{username} from database : {e}");
        AppError::internal_server_error()
    })?;

    let Some(user_id) = user_id else {
        warn!("Unknown user @{username}");
        return Err(AppError::not_found_error(Some("Utilisateur introuvable.")));
    };

    let posts = sqlx::query_as::<_, PostWithAuthorRow>(
        "SELECT posts.id, posts.content, posts.created_at, users.id AS author_id, users.username AS author_username
        FROM posts
        JOIN users ON users.id = posts.author_id
        WHERE posts.author_id = $1
        ORDER BY posts.created_at DESC
        LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(pagination_params.limit())
    .bind(pagination_params.offset())
    .fetch_all(&app_state.pool)
    .await
    .map_err(|e| {
        warn!("Error getting posts of user {user_id} from database : {e}");
        AppError::internal_server_error()
    })?;

    Ok(Json(posts.into_iter().map(PublicPost::from).collect()))
}
