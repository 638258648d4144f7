use tracing::warn;

use super::app_error::AppError;

pub fn check_new_post_data(auth_user_id: i64, content: &str) -> Result<(), AppError> {
    if content.is_empty() || content.len() > 280 {
        warn!(
            "User {} tried to create a post with a content with a wrong length : {}/280",
            auth_user_id,
            content.len()
        );
        return Err(AppError::forbidden_error(Some(
            "Le contenu d'un post doit contenir entre 1 et 280 caractères.",
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_is_rejected() {
        assert!(check_new_post_data(1, "").is_err());
    }

    #[test]
    fn too_long_content_is_rejected() {
        assert!(check_new_post_data(1, &"a".repeat(281)).is_err());
    }

    #[test]
    fn reasonable_content_is_accepted() {
        assert!(check_new_post_data(1, "post from marcus").is_ok());
        assert!(check_new_post_data(1, &"a".repeat(280)).is_ok());
    }
}
