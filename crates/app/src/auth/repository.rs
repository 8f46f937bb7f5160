//! Auth repository.

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::auth::{
    models::{ActiveAccessToken, AuthenticatedUser, UserCredentials, UserRecord, UserRole,
        UserUuid},
    token::AccessTokenVersion,
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_USER_BY_USERNAME_SQL: &str = include_str!("sql/find_user_by_username.sql");
const CREATE_ACCESS_TOKEN_SQL: &str = include_str!("sql/create_access_token.sql");
const FIND_ACTIVE_ACCESS_TOKEN_SQL: &str = include_str!("sql/find_active_access_token.sql");
const TOUCH_ACCESS_TOKEN_SQL: &str = include_str!("sql/touch_access_token.sql");

/// Insert payload for a user row. The password is already hashed.
#[derive(Debug, Clone)]
pub(crate) struct NewUserRow {
    pub(crate) uuid: UserUuid,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) role: UserRole,
}

/// Insert payload for an access token row.
#[derive(Debug, Clone)]
pub(crate) struct NewAccessToken {
    pub(crate) uuid: Uuid,
    pub(crate) user_uuid: UserUuid,
    pub(crate) version: AccessTokenVersion,
    pub(crate) token_hash: String,
    pub(crate) expires_at: jiff::Timestamp,
}

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_user(&self, user: &NewUserRow) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_USER_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_access_token(
        &self,
        token: &NewAccessToken,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ACCESS_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.user_uuid.into_uuid())
            .bind(token.version.as_i16())
            .bind(&token.token_hash)
            .bind(SqlxTimestamp::from(token.expires_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_active_access_token(
        &self,
        token_uuid: Uuid,
    ) -> Result<Option<ActiveAccessToken>, sqlx::Error> {
        query_as::<Postgres, ActiveAccessToken>(FIND_ACTIVE_ACCESS_TOKEN_SQL)
            .bind(token_uuid)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_access_token_last_used(
        &self,
        token_uuid: Uuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_ACCESS_TOKEN_SQL)
            .bind(token_uuid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn try_get_role(row: &PgRow, index: &str) -> sqlx::Result<UserRole> {
    let role: String = row.try_get(index)?;

    UserRole::from_str(&role).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            role: try_get_role(row, "role")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: UserRecord::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveAccessToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let version: i16 = row.try_get("version")?;

        let version =
            AccessTokenVersion::try_from(version).map_err(|e| sqlx::Error::ColumnDecode {
                index: "version".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            version,
            token_hash: row.try_get("token_hash")?,
            user: AuthenticatedUser {
                uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
                username: row.try_get("username")?,
                role: try_get_role(row, "role")?,
            },
        })
    }
}
