//! auth.rs
//!
//! Сервисный слой аутентификации.
//!
//! Ключевые компоненты:
//! 1.  **PasswordHasher**: хеширование и проверка паролей через bcrypt. Работа bcrypt
//!     занимает заметное время CPU, поэтому выполняется в `spawn_blocking`.
//! 2.  **TokenService**: выпуск и проверка JWT (HS256) с claims `sub`, `username`,
//!     `iat`, `exp`. Проверка не обращается к БД.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::task;

use crate::{
    config::{JwtConfig, PasswordConfig},
    error::{AppError, AppResult},
};

/// Хеширование паролей с настраиваемой стоимостью bcrypt.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn from_config(config: &PasswordConfig) -> Self {
        Self { cost: config.bcrypt_cost }
    }

    pub async fn hash(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))??;
        Ok(hashed)
    }

    pub async fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let valid = task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))??;
        Ok(valid)
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// ID пользователя (строкой, как требует RFC 7519)
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Выпущенный токен вместе со сроком жизни в секундах.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl TokenService {
    pub fn from_config(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_hours: config.expires_in_hours,
        }
    }

    pub fn issue(&self, user_id: i64, username: &str) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let ttl = TimeDelta::try_hours(self.ttl_hours)
            .ok_or_else(|| AppError::Internal("token lifetime is out of range".to_string()))?;
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::Internal("token expiry is out of range".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(IssuedToken {
            token,
            token_type: "Bearer",
            expires_in: ttl.num_seconds(),
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(secret: &str, hours: i64) -> TokenService {
        TokenService::from_config(&JwtConfig {
            secret: secret.to_string(),
            expires_in_hours: hours,
        })
    }

    #[test]
    fn issued_token_verifies_and_carries_user() {
        let service = tokens("secret", 24);
        let issued = service.issue(42, "alice").unwrap();
        assert_eq!(issued.token_type, "Bearer");
        assert_eq!(issued.expires_in, 24 * 3600);

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issued = tokens("secret-a", 24).issue(1, "bob").unwrap();
        assert!(tokens("secret-b", 24).verify(&issued.token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Срок жизни в прошлом, за пределами leeway по умолчанию (60 сек)
        let service = tokens("secret", -2);
        let issued = service.issue(1, "carol").unwrap();
        assert!(service.verify(&issued.token).is_err());
    }

    #[test]
    fn oversized_lifetime_is_an_error_not_a_panic() {
        for hours in [3_000_000_000, i64::MAX] {
            let err = tokens("secret", hours).issue(1, "dave").unwrap_err();
            assert!(matches!(err, AppError::Internal(_)), "{hours}: {err}");
        }
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(tokens("secret", 1).verify("not.a.jwt").is_err());
    }

    #[tokio::test]
    async fn password_hash_round_trip() {
        let hasher = PasswordHasher::from_config(&PasswordConfig { bcrypt_cost: 4 });
        let hash = hasher.hash("hunter2").await.unwrap();
        assert_ne!(hash, "hunter2");
        assert!(hasher.verify("hunter2", &hash).await.unwrap());
        assert!(!hasher.verify("hunter3", &hash).await.unwrap());
    }
}
