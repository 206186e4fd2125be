// src/services/auth.rs

use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    models::auth::{Claims, Principal},
};

/// Valida os tokens emitidos pelo serviço de login (HS256).
#[derive(Clone)]
pub struct TokenService {
    jwt_secret: String,
}

impl TokenService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn validate_token(&self, token: &str) -> Result<Principal, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(Principal { id: token_data.claims.sub })
    }
}

#[cfg(test)]
impl TokenService {
    pub fn create_token(&self, user_id: uuid::Uuid, ttl: chrono::Duration) -> Result<String, AppError> {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id,
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    #[test]
    fn test_valid_token_yields_principal() {
        let service = TokenService::new("segredo".into());
        let user_id = Uuid::new_v4();
        let token = service.create_token(user_id, Duration::hours(1)).unwrap();

        assert_eq!(service.validate_token(&token).unwrap(), Principal { id: user_id });
    }

    #[test]
    fn test_rejects_wrong_secret_and_expired_tokens() {
        let service = TokenService::new("segredo".into());
        let other = TokenService::new("outro".into());
        let user_id = Uuid::new_v4();

        let foreign = other.create_token(user_id, Duration::hours(1)).unwrap();
        assert!(matches!(service.validate_token(&foreign), Err(AppError::InvalidToken)));

        // Bem além da tolerância padrão de 60s
        let expired = service.create_token(user_id, Duration::hours(-2)).unwrap();
        assert!(matches!(service.validate_token(&expired), Err(AppError::InvalidToken)));

        assert!(matches!(service.validate_token("lixo"), Err(AppError::InvalidToken)));
    }
}
