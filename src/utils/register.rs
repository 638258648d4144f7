use crate::structs::register_user::RegisterUser;
use crate::utils::app_error::AppError;
use email_address::EmailAddress;
use hyper::StatusCode;
use lettre::{
    message::{header::ContentType, Mailbox},
    Address, Message, SmtpTransport, Transport,
};
use sha2::{Digest, Sha256, Sha512};
use tracing::warn;

pub fn send_html_message(
    smtp_client: &SmtpTransport,
    subject: &str,
    msg: &str,
    to: Address,
) -> Result<(), AppError> {
    smtp_client
        .send(
            &Message::builder()
                .from(Mailbox {
                    name: Some("Brèves".to_string()),
                    email: Address::new("no.reply", "creativeblogger.org").unwrap(),
                })
                .to(Mailbox {
                    name: None,
                    email: to,
                })
                .subject(subject)
                .header(ContentType::TEXT_HTML)
                .body(msg.to_string())
                .map_err(|e| {
                    warn!("Error while building email : {e}");
                    AppError::internal_server_error()
                })?,
        )
        .map_err(|e| {
            warn!("Error while sending email : {e}");
            AppError::internal_server_error()
        })?;
    Ok(())
}

pub fn check_username(username: &str) -> Result<(), AppError> {
    if username.len() < 5 || username.len() > 12 {
        warn!("Wrong username size : {username}");
        return Err(AppError::new(
            StatusCode::FORBIDDEN,
            Some("Le nom d'utilisateur doit contenir entre 5 et 12 caractères."),
        ));
    }

    for (i, c) in username.char_indices() {
        if i == 0 {
            if !c.is_alphabetic() {
                warn!("The username has to begin with a letter : {username}");
                return Err(AppError::new(
                    StatusCode::FORBIDDEN,
                    Some("Le nom d'utilisateur doit commencer par une lettre."),
                ));
            }
            continue;
        }
        if !c.is_alphanumeric() && c != '_' {
            warn!("The username has to contain only letters, digits and underscores : {username}");
            return Err(AppError::new(StatusCode::FORBIDDEN, Some("Le nom d'utilisateur ne doit contenir que des lettres, des chiffres et des underscores.")));
        }
    }

    Ok(())
}

pub fn check_email_address(email: &str) -> Result<(), AppError> {
    if !EmailAddress::is_valid(email) {
        warn!("Invalid email `{email}`");
        return Err(AppError::new(
            StatusCode::FORBIDDEN,
            Some("L'email est invalide."),
        ));
    }
    Ok(())
}

pub fn check_biography(biography: &str) -> Result<(), AppError> {
    if biography.len() > 300 {
        warn!("Biography too long : {}/300", biography.len());
        return Err(AppError::new(
            StatusCode::FORBIDDEN,
            Some("La biographie doit contenir au maximum 300 caractères."),
        ));
    }
    Ok(())
}

pub fn check_register_infos(user: &RegisterUser) -> Result<(), AppError> {
    check_username(&user.username)?;

    check_email_address(&user.email)?;

    if user.password.len() < 8 {
        warn!("Password too short : {} characters", user.password.len());
        return Err(AppError::new(
            StatusCode::FORBIDDEN,
            Some("Mot de passe trop court."),
        ));
    }

    check_biography(&user.biography)?;

    Ok(())
}

pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(password);
    format!("{:x}", hasher.finalize())
}

/// Gravatar URL for an email address, SHA-256 flavour
pub fn avatar_url(email: &str, size: u16) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.trim().to_lowercase());
    format!(
        "https://www.gravatar.com/avatar/{:x}?d=identicon&s={size}",
        hasher.finalize()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_user(username: &str, email: &str, password: &str, biography: &str) -> RegisterUser {
        RegisterUser {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            biography: biography.to_string(),
        }
    }

    #[test]
    fn valid_usernames_are_accepted() {
        assert!(check_username("marcus").is_ok());
        assert!(check_username("a2345").is_ok());
        assert!(check_username("john_doe_12").is_ok());
    }

    #[test]
    fn username_length_is_checked() {
        assert!(check_username("abcd").is_err());
        assert!(check_username("abcdefghijklm").is_err());
    }

    #[test]
    fn username_must_begin_with_a_letter() {
        assert!(check_username("1marcus").is_err());
        assert!(check_username("_marcus").is_err());
    }

    #[test]
    fn username_rejects_exotic_characters() {
        assert!(check_username("marc-us").is_err());
        assert!(check_username("marc us").is_err());
    }

    #[test]
    fn email_syntax_is_checked() {
        assert!(check_email_address("marcus@example.com").is_ok());
        assert!(check_email_address("marcus").is_err());
        assert!(check_email_address("marcus@").is_err());
    }

    #[test]
    fn register_infos_reject_short_passwords() {
        let user = register_user("marcus", "marcus@example.com", "1234567", "");
        assert!(check_register_infos(&user).is_err());
    }

    #[test]
    fn register_infos_reject_long_biographies() {
        let user = register_user("marcus", "marcus@example.com", "12345678", &"a".repeat(301));
        assert!(check_register_infos(&user).is_err());
        let user = register_user("marcus", "marcus@example.com", "12345678", &"a".repeat(300));
        assert!(check_register_infos(&user).is_ok());
    }

    #[test]
    fn password_hash_is_deterministic_and_case_sensitive() {
        assert_eq!(hash_password("cat"), hash_password("cat"));
        assert_ne!(hash_password("cat"), hash_password("Cat"));
        assert_ne!(hash_password("cat"), hash_password("dog"));
        // Sha512 hex digest
        assert_eq!(hash_password("cat").len(), 128);
    }

    #[test]
    fn avatar_url_is_case_insensitive_on_the_email() {
        assert_eq!(
            avatar_url("marcus@example.com", 80),
            avatar_url(" Marcus@Example.COM ", 80)
        );
        assert!(avatar_url("marcus@example.com", 80).starts_with("https://www.gravatar.com/avatar/"));
    }
}
