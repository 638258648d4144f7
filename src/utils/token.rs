use crate::utils::app_error::AppError;
use base64::{engine::general_purpose, Engine};
use chrono::{Duration, Utc};
use hyper::StatusCode;
use libaes::Cipher;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

/// Struct that represents a serialized token
#[derive(Debug, Serialize, Deserialize)]
pub struct Token {
    exp: i64,
    sub: String,
}

impl Token {
    /// Create an encrypted and encoded token
    pub fn create(sub: String, exp_in: Duration, cipher: &Cipher) -> String {
        // Get expiration timestamp
        let exp = (Utc::now() + exp_in).timestamp();

        // Get serialized Claims
        let claims = json!(Token { exp, sub }).to_string();

        // Generate nonce
        let mut nonce = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut nonce);

        // Create plaintext
        let plaintext = claims.as_bytes();

        //Encrypt data
        let encrypted = cipher.cbc_encrypt(&nonce, plaintext);
        //Encode data with nonce at the beggining
        general_purpose::STANDARD.encode([&nonce, encrypted.as_slice()].concat())
    }

    /// Decode token and return its content or an error
    pub fn decode(token: &str, cipher: &Cipher) -> Result<String, AppError> {
        //Decode the token
        let encrypted_decoded = general_purpose::STANDARD.decode(token).map_err(|e| {
            warn!("Error decoding token : {e}");
            AppError::new(StatusCode::FORBIDDEN, Some("Token invalide."))
        })?;
        if encrypted_decoded.len() <= 16 {
            warn!("Token too short : {} bytes", encrypted_decoded.len());
            return Err(AppError::new(StatusCode::FORBIDDEN, Some("Token invalide.")));
        }
        //Split the nonce and the data
        let nonce = &encrypted_decoded[..16];
        let datas = &encrypted_decoded[16..];
        //Decrypt the token
        let decrypted = cipher.cbc_decrypt(nonce, datas);
        //Convert it to String
        let string_decrypted = String::from_utf8(decrypted).map_err(|e| {
            warn!("Error decrypting token : {e}");
            AppError::new(StatusCode::FORBIDDEN, Some("Token invalide."))
        })?;

        //Deserialize token
        let token: Token = serde_json::from_str(&string_decrypted).map_err(|e| {
            warn!("Error deserializing token `{string_decrypted}` : {e}");
            AppError::new(StatusCode::FORBIDDEN, Some("Token invalide."))
        })?;
        //Check if the token is expired
        if token.exp <= Utc::now().timestamp() {
            warn!(
                "Expired token {}, expire timestamp : {}",
                token.sub, token.exp
            );
            return Err(AppError::new(StatusCode::FORBIDDEN, Some("Token expiré.")));
        }

        // Return the content of the token
        Ok(token.sub)
    }
}

/// Generate the opaque session token stored on the user row
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> Cipher {
        Cipher::new_256(b"an example very very secret key.")
    }

    #[test]
    fn create_then_decode_returns_the_subject() {
        let cipher = cipher();
        let token = Token::create("marcus@example.com".to_string(), Duration::minutes(10), &cipher);
        let sub = Token::decode(&token, &cipher).expect("the token should be valid");
        assert_eq!(sub, "marcus@example.com");
    }

    #[test]
    fn expired_token_is_rejected() {
        let cipher = cipher();
        let token = Token::create("marcus".to_string(), Duration::minutes(-5), &cipher);
        assert!(Token::decode(&token, &cipher).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let cipher = cipher();
        assert!(Token::decode("pas un token", &cipher).is_err());
        // Valid base64, but way too short to contain a nonce
        assert!(Token::decode("AAAA", &cipher).is_err());
    }

    #[test]
    fn token_encrypted_with_another_key_is_rejected() {
        let token = Token::create(
            "marcus".to_string(),
            Duration::minutes(10),
            &Cipher::new_256(b"another key, also 32 bytes long!"),
        );
        assert!(Token::decode(&token, &cipher()).is_err());
    }

    #[test]
    fn session_tokens_are_unique() {
        assert_ne!(generate_session_token(), generate_session_token());
    }
}
