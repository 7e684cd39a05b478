use std::{error::Error, fmt::Debug};

use anyhow::Context;
use chrono::Utc;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{AccountPassword, UserEmail},
    models::User,
    password::hash_password,
    schema::users,
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

/// Account data that passed validation at the HTTP boundary.
#[derive(Debug)]
pub struct NewAccount{
    pub email: UserEmail,
    pub password: AccountPassword,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: &'static str
}

// Error associated with inserting user to users table
#[derive(Error)]
pub enum UserInsertError{
    #[error("A user with this email already exists")]
    EmailNotUnique(#[source] diesel::result::Error),
    #[error("unexpected database / hashing error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for UserInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Inserting user into the database",
    skip(conn, account),
    fields(email = %account.email.as_ref(), role = account.role)
)]
pub async fn insert_user(
    mut conn: DbConnection,
    account: NewAccount
) -> Result<User, UserInsertError> {

    let password_hash = hash_password(account.password.into_secret()).await?;

    let user = User{
        user_id: Uuid::new_v4(),
        email: account.email.as_ref().to_string(),
        password_hash,
        first_name: account.first_name,
        last_name: account.last_name,
        phone: account.phone,
        role: account.role.to_string(),
        created_at: Utc::now()
    };

    spawn_blocking_with_tracing(move || {
        diesel::insert_into(users::table)
            .values(&user)
            .returning(User::as_returning())
            .get_result::<User>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _
                ) => UserInsertError::EmailNotUnique(e),
                _ => UserInsertError::UnexpectedError(anyhow::anyhow!(e).context("Failed to insert user"))
            })
    })
    .await
    .context("Failed due to threadpool error")?
}

// Function to query user from email id
#[tracing::instrument(
    "Getting user from email",
    skip(conn)
)]
pub async fn get_user_by_email(
    mut conn: DbConnection,
    email: String
) -> Result<Option<User>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()
            .context("Failed to query user by email")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting user from id",
    skip(conn)
)]
pub async fn get_user_by_id(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<Option<User>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()
            .context("Failed to query user by id")
    })
    .await
    .context("Failed due to threadpool error")?
}

pub async fn count_users(mut conn: DbConnection) -> Result<i64, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        users::table
            .count()
            .get_result::<i64>(&mut conn)
            .context("Failed to count users")
    })
    .await
    .context("Failed due to threadpool error")?
}
