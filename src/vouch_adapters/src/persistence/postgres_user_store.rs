use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};
use vouch_core::{Email, NewUser, Password, User, UserId, UserStore, UserStoreError, Username};

use super::password_hashing::{compute_password_hash, verify_password_hash};

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";
const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }

    async fn password_hash(&self, id: UserId) -> Result<Secret<String>, UserStoreError> {
        let hash: Option<String> =
            sqlx::query_scalar(r#"SELECT password_hash FROM users WHERE id = $1"#)
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        hash.map(Secret::from).ok_or(UserStoreError::UserNotFound)
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    username: String,
    password_hash: String,
    confirmed: bool,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email =
            Email::parse(&row.email).map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        let username = Username::parse(&row.username)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        Ok(User::new(
            UserId::new(row.id),
            email,
            username,
            Secret::from(row.password_hash),
            row.confirmed,
        ))
    }
}

fn map_write_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        match db_err.constraint() {
            Some(EMAIL_UNIQUE_CONSTRAINT) => return UserStoreError::EmailAlreadyRegistered,
            Some(USERNAME_UNIQUE_CONSTRAINT) => return UserStoreError::UsernameAlreadyTaken,
            _ => {}
        }
    }
    UserStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(user.password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let row: UserRow = sqlx::query_as(
            r#"
                INSERT INTO users (email, username, password_hash, confirmed)
                VALUES ($1, $2, $3, FALSE)
                RETURNING id, email, username, password_hash, confirmed
            "#,
        )
        .bind(user.email.as_ref().expose_secret())
        .bind(user.username.as_str())
        .bind(password_hash.expose_secret())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        User::try_from(row)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip(self))]
    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT id, email, username, password_hash, confirmed
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };
        User::try_from(row)
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT id, email, username, password_hash, confirmed
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };
        User::try_from(row)
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let user = self.get_user_by_email(email).await?;

        verify_password_hash(user.password_hash().clone(), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        Ok(user)
    }

    #[tracing::instrument(name = "Verifying password in PostgreSQL", skip(self, password))]
    async fn verify_password(
        &self,
        id: UserId,
        password: &Password,
    ) -> Result<(), UserStoreError> {
        let hash = self.password_hash(id).await?;

        verify_password_hash(hash, password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)
    }

    #[tracing::instrument(name = "Confirming user in PostgreSQL", skip(self))]
    async fn set_confirmed(&self, id: UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query(r#"UPDATE users SET confirmed = TRUE WHERE id = $1"#)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Set new password", skip(self, new_password))]
    async fn set_new_password(
        &self,
        id: UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let result = sqlx::query(r#"UPDATE users SET password_hash = $1 WHERE id = $2"#)
            .bind(password_hash.expose_secret())
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Delete user from user store", skip(self))]
    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }
}
