use axum::response::{IntoResponse, Response};
use hyper::StatusCode;

#[derive(Debug)]
pub struct AppError {
    status_code: StatusCode,
    message: Option<String>,
}

impl AppError {
    pub fn new(status_code: StatusCode, message: Option<&str>) -> Self {
        Self {
            status_code,
            message: message.map(|message| message.to_string()),
        }
    }

    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, None)
    }

    pub fn forbidden_error(message: Option<&str>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found_error(message: Option<&str>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn you_have_to_be_connected_to_perform_this_action_error() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            Some("Vous devez être connecté pour effectuer cette action."),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.message {
            Some(message) => (self.status_code, message).into_response(),
            None => self.status_code.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_server_error_has_no_body() {
        let response = AppError::internal_server_error().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn forbidden_error_keeps_its_message() {
        let response = AppError::forbidden_error(Some("Interdit.")).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn connection_required_error_is_unauthorized() {
        let response =
            AppError::you_have_to_be_connected_to_perform_this_action_error().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
