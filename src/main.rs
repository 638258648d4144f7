mod extractors;
mod middleware;
mod routes;
mod structs;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use hyper::header::HeaderValue;
use hyper::http::Method;
use lettre::{transport::smtp::authentication::Credentials, SmtpTransport};
use libaes::Cipher;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::middleware::logger_middleware::logger_middleware;
use crate::routes::edit_profile_route::edit_profile_route;
use crate::routes::email_confirm_route::email_confirm_route;
use crate::routes::follow_user_route::follow_user_route;
use crate::routes::get_posts::{get_followed_posts_route, get_posts_route};
use crate::routes::get_profile_route::{get_profile_route, get_user_posts_route};
use crate::routes::login_route::login_route;
use crate::routes::logout_route::logout_route;
use crate::routes::publish_post::publish_post_route;
use crate::routes::register_route::register_route;
use crate::routes::reset_password_route::{reset_password_confirm_route, reset_password_route};
use crate::routes::unfollow_user_route::unfollow_user_route;
use crate::utils::delete_not_activated_expired_accounts::delete_not_activated_expired_accounts;

#[derive(Clone)]
pub struct AppState {
    pool: PgPool,
    smtp_client: SmtpTransport,
    cipher: Arc<Cipher>,
}

const FRONT_URL: &str = "https://breves.creativeblogger.org";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url =
        std::env::var("DATABASE_URL").expect("Please set DATABASE_URL value in the environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to the database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let smtp_client = SmtpTransport::relay(
        &std::env::var("EMAIL_SMTP_SERVER")
            .expect("Please set EMAIL_SMTP_SERVER value in the environment"),
    )
    .expect("Failed to build the SMTP client")
    .credentials(Credentials::new(
        std::env::var("EMAIL").expect("Please set EMAIL value in the environment"),
        std::env::var("EMAIL_PASSWORD")
            .expect("Please set EMAIL_PASSWORD value in the environment"),
    ))
    .build();

    match smtp_client.test_connection() {
        Ok(true) => info!("Connexion SMTP effectuée avec succès !"),
        Ok(false) => warn!("SMTP connection test failed, emails will probably not be sent"),
        Err(e) => warn!("Error testing the SMTP connection : {e}"),
    }

    let secret_key =
        std::env::var("ENCODING_KEY").expect("Please set ENCODING_KEY value in the environment");

    if secret_key.len() != 32 {
        panic!("La clé d'encryption doit avoir une taille de 32 bytes");
    }

    let secret_key: [u8; 32] = secret_key
        .as_bytes()
        .try_into()
        .expect("ENCODING_KEY must be 32 bytes long");

    let app_state = Arc::new(AppState {
        pool: pool.clone(),
        smtp_client,
        cipher: Arc::new(Cipher::new_256(&secret_key)),
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_origin(FRONT_URL.parse::<HeaderValue>().unwrap())
        .allow_credentials(true);

    let router = Router::new()
        .route("/register", post(register_route))
        .route("/register/email_confirm", post(email_confirm_route))
        .route("/login", post(login_route))
        .route("/logout", post(logout_route))
        .route("/reset_password", post(reset_password_route))
        .route("/reset_password/confirm", post(reset_password_confirm_route))
        .route("/posts", get(get_posts_route).post(publish_post_route))
        .route("/posts/followed", get(get_followed_posts_route))
        .route("/profile", patch(edit_profile_route))
        .route("/users/:username", get(get_profile_route))
        .route("/users/:username/posts", get(get_user_posts_route))
        .route(
            "/users/:username/follow",
            post(follow_user_route).delete(unfollow_user_route),
        )
        .layer(cors)
        .layer(axum_middleware::from_fn(logger_middleware))
        .with_state(app_state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Listening on {addr}");

    tokio::select! {
        _ = delete_not_activated_expired_accounts(&pool) => {
            warn!("This should never happen");
        },
        result = axum::Server::bind(&addr).serve(router.into_make_service()) => {
            result.expect("Server error");
        }
    }
}
