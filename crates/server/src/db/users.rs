//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use webify_core::{Email, UserId};

use super::{RepositoryError, conflict_on_unique};
use crate::models::{AuthSource, User};

/// Outcome of linking an identity-provider account to a local user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySync {
    /// A user with this external id already existed and was refreshed.
    Updated,
    /// A user with this email existed and now carries the external id.
    Linked,
    /// A new user was inserted.
    Created,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    external_id: Option<String>,
    auth_source: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let auth_source = AuthSource::from_db(&row.auth_source).ok_or_else(|| {
            RepositoryError::DataCorruption(format!("invalid auth source: {}", row.auth_source))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            name: row.name,
            email,
            external_id: row.external_id,
            auth_source,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserWithPasswordRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: Option<String>,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, email, external_id, auth_source, created_at, updated_at
            FROM webify.users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, email, external_id, auth_source, created_at, updated_at
            FROM webify.users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    /// Get a user by their identity-provider id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, email, external_id, auth_source, created_at, updated_at
            FROM webify.users
            WHERE external_id = $1
            ",
        )
        .bind(external_id)
        .fetch_optional(self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    /// Create a new user with name, email and password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO webify.users (name, email, auth_source)
            VALUES ($1, $2, 'password')
            RETURNING id, name, email, external_id, auth_source, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(email)
        .fetch_one(&mut *tx)
        .await
        .map_err(conflict_on_unique("email"))?;

        sqlx::query(
            r"
            INSERT INTO webify.user_password (user_id, password_hash)
            VALUES ($1, $2)
            ",
        )
        .bind(row.id)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        User::try_from(row)
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if the user doesn't exist or has no password set
    /// (identity-provider accounts).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithPasswordRow>(
            r"
            SELECT u.id, u.name, u.email, u.external_id, u.auth_source,
                   u.created_at, u.updated_at, p.password_hash
            FROM webify.users u
            LEFT JOIN webify.user_password p ON u.id = p.user_id
            WHERE u.email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let Some(password_hash) = row.password_hash else {
            return Ok(None);
        };

        Ok(Some((User::try_from(row.user)?, password_hash)))
    }

    /// Reconcile an identity-provider account with the local users table.
    ///
    /// Runs in one transaction: refresh the user holding `external_id`, else
    /// attach `external_id` to the user with this email, else insert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new email belongs to a
    /// different user.
    pub async fn sync_identity(
        &self,
        external_id: &str,
        email: &Email,
        name: &str,
    ) -> Result<(User, IdentitySync), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let outcome = if let Some(row) = update_by_external_id(&mut tx, external_id, email, name).await? {
            (row, IdentitySync::Updated)
        } else if let Some(row) = link_by_email(&mut tx, external_id, email).await? {
            (row, IdentitySync::Linked)
        } else {
            let row = sqlx::query_as::<_, UserRow>(
                r"
                INSERT INTO webify.users (name, email, external_id, auth_source)
                VALUES ($1, $2, $3, 'identity')
                RETURNING id, name, email, external_id, auth_source, created_at, updated_at
                ",
            )
            .bind(name)
            .bind(email)
            .bind(external_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(conflict_on_unique("user"))?;
            (row, IdentitySync::Created)
        };

        tx.commit().await?;

        let (row, sync) = outcome;
        Ok((User::try_from(row)?, sync))
    }
}

async fn update_by_external_id(
    tx: &mut Transaction<'_, Postgres>,
    external_id: &str,
    email: &Email,
    name: &str,
) -> Result<Option<UserRow>, RepositoryError> {
    sqlx::query_as::<_, UserRow>(
        r"
        UPDATE webify.users
        SET name = $2, email = $3, updated_at = NOW()
        WHERE external_id = $1
        RETURNING id, name, email, external_id, auth_source, created_at, updated_at
        ",
    )
    .bind(external_id)
    .bind(name)
    .bind(email)
    .fetch_optional(&mut **tx)
    .await
    .map_err(conflict_on_unique("email"))
}

async fn link_by_email(
    tx: &mut Transaction<'_, Postgres>,
    external_id: &str,
    email: &Email,
) -> Result<Option<UserRow>, RepositoryError> {
    sqlx::query_as::<_, UserRow>(
        r"
        UPDATE webify.users
        SET external_id = $1, updated_at = NOW()
        WHERE email = $2
        RETURNING id, name, email, external_id, auth_source, created_at, updated_at
        ",
    )
    .bind(external_id)
    .bind(email)
    .fetch_optional(&mut **tx)
    .await
    .map_err(conflict_on_unique("external id"))
}
