use serde::Deserialize;

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordConfirm {
    pub token: String,
    pub password: String,
}
