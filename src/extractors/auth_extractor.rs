use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::warn;

use crate::{utils::app_error::AppError, AppState};

#[derive(Deserialize, sqlx::FromRow)]
pub struct InnerAuthUser {
    pub id: i64,
    pub username: String,
}

pub struct AuthUser(pub Option<Arc<InnerAuthUser>>);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        // Infallible with these generics
        let cookies = CookieJar::from_request_parts(parts, state).await.unwrap();
        let token = match cookies.get("session") {
            Some(cookie) => cookie.value().to_string(),
            None => return Ok(AuthUser(None)),
        };
        let user = sqlx::query_as::<_, InnerAuthUser>(
            "SELECT id, username FROM users WHERE token = $1 AND email_verified = TRUE AND is_banned = FALSE",
        )
        .bind(&token)
        .fetch_optional(&app_state.pool)
        .await
        .map_err(|e| {
            warn!("Error getting auth user from database : {e}");
            AppError::internal_server_error()
        })?;

        match user {
            Some(user) => {
                if let Err(e) = sqlx::query("UPDATE users SET last_seen = NOW() WHERE id = $1")
                    .bind(user.id)
                    .execute(&app_state.pool)
                    .await
                {
                    warn!("Error updating last seen of user {} : {e}", user.id);
                }
                Ok(AuthUser(Some(Arc::new(user))))
            }
            None => Ok(AuthUser(None)),
        }
    }
}
