use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub password_algorithm: String,
}

impl AuthConfig {
    /// Build from `[auth]` settings. Without a configured secret a random one
    /// is generated, so issued tokens do not survive a restart.
    pub fn from_settings(settings: &configs::AuthConfig) -> Self {
        let jwt_secret = match &settings.jwt_secret {
            Some(secret) => secret.clone(),
            None => {
                warn!(service = "auth", event = "jwt_secret_generated", "no JWT secret configured; tokens will not survive a restart");
                random_secret()
            }
        };
        Self {
            jwt_secret,
            token_ttl: Duration::seconds(settings.token_ttl_secs.min(MAX_TOKEN_TTL_SECS) as i64),
            password_algorithm: "argon2id".into(),
        }
    }
}

fn random_secret() -> String {
    OsRng.sample_iter(&Alphanumeric).take(64).map(char::from).collect()
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string())
    }

    /// Create the admin account, or reset its password if it already exists.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let cfg = AuthConfig { jwt_secret: "0123456789abcdef".into(), token_ttl: chrono::Duration::hours(1), password_algorithm: "argon2id".into() };
    /// let svc = AuthService::new(repo, cfg);
    /// let user = tokio_test::block_on(svc.bootstrap_admin("admin", "Secret123")).unwrap();
    /// assert_eq!(user.username, "admin");
    /// ```
    #[instrument(skip(self, password))]
    pub async fn bootstrap_admin(&self, username: &str, password: &str) -> Result<AuthUser, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("username required".into()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }

        let user = match self.repo.find_user_by_username(username).await? {
            Some(existing) => {
                debug!("admin exists: {}", existing.username);
                existing
            }
            None => self.repo.create_user(username).await?,
        };
        let hash = self.hash_password(password)?;
        self.repo.upsert_password(user.id, hash, self.cfg.password_algorithm.clone()).await?;
        info!(service = "auth", event = "admin_bootstrapped", user_id = %user.id, username = %user.username);
        Ok(user)
    }

    /// Check credentials and issue a signed token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::LoginInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let cfg = AuthConfig { jwt_secret: "0123456789abcdef".into(), token_ttl: chrono::Duration::hours(1), password_algorithm: "argon2id".into() };
    /// let svc = AuthService::new(repo, cfg);
    /// tokio_test::block_on(svc.bootstrap_admin("admin", "Passw0rd!")).unwrap();
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "admin".into(), password: "Passw0rd!".into() })).unwrap();
    /// let claims = svc.verify_token(&session.token).unwrap();
    /// assert_eq!(claims.sub, "admin");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_user_by_username(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let (token, expires_at) = self.issue_token(&user)?;
        info!(service = "auth", event = "login", user_id = %user.id);
        Ok(AuthSession { user, token, expires_at })
    }

    /// Sign a token for `user` valid for the configured TTL.
    pub fn issue_token(&self, user: &AuthUser) -> Result<(String, chrono::DateTime<Utc>), AuthError> {
        let now = Utc::now();
        let expires_at = now + self.cfg.token_ttl;
        let claims = Claims {
            sub: user.username.clone(),
            uid: user.id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&JwtHeader::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok((token, expires_at))
    }

    /// Verify signature and expiry of a bearer token.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc() -> AuthService<MockAuthRepository> {
        AuthService::new(
            Arc::new(MockAuthRepository::default()),
            AuthConfig { jwt_secret: "test-secret-0123456789".into(), token_ttl: Duration::hours(1), password_algorithm: "argon2id".into() },
        )
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let svc = svc();
        svc.bootstrap_admin("admin", "correct-horse").await.unwrap();
        let err = svc.login(LoginInput { username: "admin".into(), password: "nope".into() }).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
        let err = svc.login(LoginInput { username: "ghost".into(), password: "correct-horse".into() }).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn short_password_rejected() {
        let err = svc().bootstrap_admin("admin", "short").await.unwrap_err();
        assert_eq!(err.code(), 1001);
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent_and_rotates_password() {
        let svc = svc();
        let first = svc.bootstrap_admin("admin", "first-password").await.unwrap();
        let second = svc.bootstrap_admin("admin", "second-password").await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(svc.login(LoginInput { username: "admin".into(), password: "first-password".into() }).await.is_err());
        assert!(svc.login(LoginInput { username: "admin".into(), password: "second-password".into() }).await.is_ok());
    }

    #[tokio::test]
    async fn token_carries_claims() {
        let svc = svc();
        let user = svc.bootstrap_admin("admin", "correct-horse").await.unwrap();
        let session = svc.login(LoginInput { username: "admin".into(), password: "correct-horse".into() }).await.unwrap();
        let claims = svc.verify_token(&session.token).unwrap();
        assert_eq!(claims.uid, user.id.to_string());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_and_foreign_tokens_rejected() {
        let svc = svc();
        let past = Utc::now().timestamp() - 10;
        let claims = Claims { sub: "admin".into(), uid: "x".into(), iat: past - 3600, exp: past };
        let expired = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(b"test-secret-0123456789")).unwrap();
        assert!(matches!(svc.verify_token(&expired), Err(AuthError::TokenExpired)));

        let claims = Claims { sub: "admin".into(), uid: "x".into(), iat: Utc::now().timestamp(), exp: Utc::now().timestamp() + 600 };
        let forged = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(b"some-other-secret")).unwrap();
        assert!(matches!(svc.verify_token(&forged), Err(AuthError::TokenError(_))));
        assert!(svc.verify_token("not.a.token").is_err());
    }

    #[test]
    fn missing_secret_generates_one() {
        let settings = configs::AuthConfig::default();
        let a = AuthConfig::from_settings(&settings);
        let b = AuthConfig::from_settings(&settings);
        assert_eq!(a.jwt_secret.len(), 64);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }
}
