use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use hyper::StatusCode;
use tracing::warn;

use crate::structs::login_user::LoginUser;
use crate::utils::app_error::AppError;
use crate::utils::register::hash_password;
use crate::utils::register::{check_email_address, check_username};
use crate::AppState;

#[derive(sqlx::FromRow)]
struct UserForLogin {
    token: String,
    email_verified: bool,
}

pub async fn login_route(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(login_user): Json<LoginUser>,
) -> Result<(CookieJar, StatusCode), AppError> {
    let username_or_email = login_user.username_or_email.to_lowercase();
    let password = hash_password(&login_user.password);
    drop(login_user);

    let user = if username_or_email.contains('@') {
        check_email_address(&username_or_email)?;
        sqlx::query_as::<_, UserForLogin>(
            "SELECT token, email_verified FROM users WHERE email = $1 AND password = $2 AND is_banned = FALSE",
        )
        .bind(&username_or_email)
        .bind(&password)
        .fetch_optional(&app_state.pool)
        .await
        .map_err(|e| {
            warn!("Error getting user with email `{username_or_email}` from database : {e}");
            AppError::internal_server_error()
        })?
    } else {
        check_username(&username_or_email)?;
        sqlx::query_as::<_, UserForLogin>(
            "SELECT token, email_verified FROM users WHERE username = $1 AND password = $2 AND is_banned = FALSE",
        )
        .bind(&username_or_email)
        .bind(&password)
        .fetch_optional(&app_state.pool)
        .await
        .map_err(|e| {
            warn!("Error getting user @{username_or_email} from database : {e}");
            AppError::internal_server_error()
        })?
    };

    let user = match user {
        Some(user) => user,
        None => {
            warn!("Wrong credentials for `{username_or_email}`");
            return Err(AppError::forbidden_error(Some("Identifiants invalides.")));
        }
    };

    if !user.email_verified {
        warn!("`{username_or_email}` tried to log in without a confirmed email");
        return Err(AppError::forbidden_error(Some(
            "Veuillez confirmer votre adresse email avant de vous connecter.",
        )));
    }

    let cookie = Cookie::build("session", user.token)
        .path("/")
        .http_only(true)
        .finish();

    Ok((jar.add(cookie), StatusCode::OK))
}
