use axum_extra::extract::cookie::{Cookie, CookieJar};
use hyper::StatusCode;

pub async fn logout_route(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::named("session");
    cookie.set_path("/");

    (jar.remove(cookie), StatusCode::OK)
}
