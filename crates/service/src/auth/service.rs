use std::sync::Arc;

use argon2::{password_hash::PasswordVerifier, Argon2, PasswordHash};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{info, instrument};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Issued tokens stay valid this long.
const TOKEN_TTL_HOURS: i64 = 12;

/// Signing configuration; without a secret, logins succeed but mint no token.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
}

/// Decode and validate an HS256 token, returning its claims.
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Login and token checks against an [`AuthRepository`], free of any
/// web-framework types.
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    /// Authenticate an account and issue a token when a secret is configured.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::LoginInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// repo.seed(1, "Amelia", "amelia@example.com", "Secret123", &["USER"]);
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: Some("secret".into()) });
    /// let session = tokio_test::block_on(svc.login(LoginInput {
    ///     email: "amelia@example.com".into(),
    ///     password: "Secret123".into(),
    /// }))
    /// .unwrap();
    /// assert_eq!(session.user.email, "amelia@example.com");
    /// assert!(session.token.is_some());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let record = self
            .repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&record.password_hash)
            .map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let user = record.into_user();
        let mut token = None;
        if let Some(secret) = &self.cfg.jwt_secret {
            let exp =
                (chrono::Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
            let claims = Claims {
                sub: user.email.clone(),
                uid: user.id,
                roles: user.roles.clone(),
                exp,
            };
            token = Some(
                encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
                    .map_err(|e| AuthError::TokenError(e.to_string()))?,
            );
        }

        info!(user_id = user.id, email = %user.email, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    /// Resolve the account behind a token. Fails when the token is bad or
    /// the account no longer exists.
    pub async fn current_user(&self, token: &str) -> Result<AuthUser, AuthError> {
        let secret = self
            .cfg
            .jwt_secret
            .as_deref()
            .ok_or_else(|| AuthError::TokenError("jwt secret not configured".into()))?;
        let claims = decode_token(secret, token)?;
        let record = self
            .repo
            .find_user_by_id(claims.uid)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        Ok(record.into_user())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn service(secret: Option<&str>) -> AuthService<MockAuthRepository> {
        let repo = MockAuthRepository::default();
        repo.seed(1, "Amelia", "amelia@example.com", "Secret123", &["USER", "ADMIN"]);
        AuthService::new(Arc::new(repo), AuthConfig { jwt_secret: secret.map(String::from) })
    }

    #[tokio::test]
    async fn login_mints_a_decodable_token() {
        let svc = service(Some("secret"));
        let session = svc
            .login(LoginInput { email: "amelia@example.com".into(), password: "Secret123".into() })
            .await
            .unwrap();

        let claims = decode_token("secret", session.token.as_deref().unwrap()).unwrap();
        assert_eq!(claims.sub, "amelia@example.com");
        assert_eq!(claims.uid, 1);
        assert!(claims.has_role("admin"));
        assert!(!claims.has_role("intern"));
    }

    #[tokio::test]
    async fn login_without_secret_yields_no_token() {
        let svc = service(None);
        let session = svc
            .login(LoginInput { email: "amelia@example.com".into(), password: "Secret123".into() })
            .await
            .unwrap();
        assert!(session.token.is_none());
        assert_eq!(session.user.roles, vec!["USER".to_string(), "ADMIN".to_string()]);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let svc = service(Some("secret"));
        let result = svc
            .login(LoginInput { email: "amelia@example.com".into(), password: "nope".into() })
            .await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn unknown_email_is_unauthorized() {
        let svc = service(Some("secret"));
        let result = svc
            .login(LoginInput { email: "ghost@example.com".into(), password: "Secret123".into() })
            .await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn current_user_round_trips_through_the_token() {
        let svc = service(Some("secret"));
        let session = svc
            .login(LoginInput { email: "amelia@example.com".into(), password: "Secret123".into() })
            .await
            .unwrap();

        let user = svc.current_user(session.token.as_deref().unwrap()).await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Amelia");
    }

    #[tokio::test]
    async fn garbage_token_is_a_token_error() {
        let svc = service(Some("secret"));
        let result = svc.current_user("not-a-jwt").await;
        assert!(matches!(result, Err(AuthError::TokenError(_))));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let svc = service(Some("secret"));
        let session = svc
            .login(LoginInput { email: "amelia@example.com".into(), password: "Secret123".into() })
            .await
            .unwrap();
        let result = decode_token("other", session.token.as_deref().unwrap());
        assert!(matches!(result, Err(AuthError::TokenError(_))));
    }

    #[tokio::test]
    async fn current_user_fails_after_account_removal() {
        let repo = Arc::new(MockAuthRepository::default());
        repo.seed(7, "Briar", "briar@example.com", "Secret123", &["USER"]);
        let svc =
            AuthService::new(repo.clone(), AuthConfig { jwt_secret: Some("secret".into()) });
        let session = svc
            .login(LoginInput { email: "briar@example.com".into(), password: "Secret123".into() })
            .await
            .unwrap();

        repo.remove(7);
        let result = svc.current_user(session.token.as_deref().unwrap()).await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }
}
