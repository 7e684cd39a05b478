use actix_web::{http::StatusCode, web, HttpResponse};
use secrecy::SecretString;
use serde::Deserialize;

use crate::{
    auth::jwt::Tokenizer,
    db_interaction::get_user_by_email,
    domain::UserEmail,
    password::verify_password,
    utils::{get_pooled_connection, DbPool}
};

use super::{session_response, AuthRouteError};

#[derive(Deserialize, Debug)]
pub struct LoginForm{
    pub email: String,
    pub password: SecretString
}

#[tracing::instrument(
    "Logging in user",
    skip(pool, tokenizer, form),
    fields(email = %form.email)
)]
pub async fn login(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Json<LoginForm>
) -> Result<HttpResponse, AuthRouteError>{
    let form = form.into_inner();
    let email = UserEmail::parse(form.email)
        .map_err(AuthRouteError::ValidationError)?;

    let conn = get_pooled_connection(&pool).await?;

    let user = match get_user_by_email(conn, email.inner()).await? {
        Some(user) => user,
        None => {
            tracing::info!("No user registered with this email");
            return Err(AuthRouteError::InvalidCredentials)
        }
    };

    if !verify_password(form.password, user.password_hash.clone()).await? {
        tracing::info!("Passwords did not match");
        return Err(AuthRouteError::InvalidCredentials)
    }

    session_response(StatusCode::OK, "Successfully logged in", &tokenizer, user)
}
