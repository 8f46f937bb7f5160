//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{
    errors::AuthServiceError,
    models::{AuthenticatedUser, IssuedLogin, NewUser, UserRecord, UserUuid},
    password::{hash_password, verify_password},
    repository::{NewAccessToken, NewUserRow, PgAuthRepository},
    token::{AccessTokenVersion, format_access_token, generate_access_token_secret,
        hash_verifier_input, parse_access_token},
};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Lifetime of an issued access token.
const ACCESS_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, user: NewUser) -> Result<UserRecord, AuthServiceError> {
        let username = user.username.trim();

        if username.is_empty() {
            return Err(AuthServiceError::InvalidData);
        }

        if !user.email.contains('@') {
            return Err(AuthServiceError::InvalidData);
        }

        if user.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthServiceError::WeakPassword);
        }

        let password_hash = hash_password(&user.password)?;

        let created = self
            .repository
            .create_user(&NewUserRow {
                uuid: UserUuid::new(),
                username: username.to_string(),
                email: user.email,
                password_hash,
                role: user.role,
            })
            .await?;

        Ok(created)
    }

    async fn login(&self, username: &str, password: &str) -> Result<IssuedLogin, AuthServiceError> {
        let Some(credentials) = self.repository.find_user_by_username(username).await? else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        if !verify_password(password, &credentials.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let user = credentials.user;
        let token_uuid = Uuid::now_v7();
        let version = AccessTokenVersion::V1;
        let secret = generate_access_token_secret();
        let token = format_access_token(token_uuid, version, &secret);
        let token_hash = hash_verifier_input(&token_uuid, version, &user.uuid, &secret);

        let expires_at = Timestamp::now()
            .checked_add(ACCESS_TOKEN_TTL)
            .unwrap_or(Timestamp::MAX);

        self.repository
            .create_access_token(&NewAccessToken {
                uuid: token_uuid,
                user_uuid: user.uuid,
                version,
                token_hash,
                expires_at,
            })
            .await?;

        Ok(IssuedLogin {
            token,
            expires_at,
            user,
        })
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let parsed = parse_access_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_access_token(parsed.token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed.version {
            return Err(AuthServiceError::NotFound);
        }

        let computed = hash_verifier_input(
            &parsed.token_uuid,
            parsed.version,
            &token.user.uuid,
            &parsed.secret,
        );

        if computed != token.token_hash {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self
            .repository
            .touch_access_token_last_used(parsed.token_uuid)
            .await
        {
            tracing::debug!("failed to touch access token last_used_at: {error}");
        }

        Ok(token.user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a user account from a registration payload.
    async fn register(&self, user: NewUser) -> Result<UserRecord, AuthServiceError>;

    /// Verify credentials and issue a fresh access token.
    async fn login(&self, username: &str, password: &str)
    -> Result<IssuedLogin, AuthServiceError>;

    /// Resolve a bearer token to the user it authenticates.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;
}
