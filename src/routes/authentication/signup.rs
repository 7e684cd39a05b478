use actix_web::{http::StatusCode, web, HttpResponse};
use secrecy::SecretString;
use serde::Deserialize;

use crate::{
    auth::jwt::Tokenizer,
    db_interaction::{insert_user, NewAccount},
    domain::{AccountPassword, BoundedText, PhoneNumberDomain, UserEmail},
    models::ROLE_CLIENT,
    utils::{get_pooled_connection, DbPool}
};

use super::{session_response, AuthRouteError};

const MAX_PERSON_NAME_CHARS: usize = 100;

#[derive(Deserialize, Debug)]
pub struct SignupForm{
    email: String,
    password: SecretString,
    #[serde(rename = "fname")]
    first_name: String,
    #[serde(rename = "lname")]
    last_name: String,
    phone: Option<String>
}

impl TryFrom<SignupForm> for NewAccount {
    type Error = String;

    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        let phone = match form.phone {
            Some(phone) if !phone.trim().is_empty() => Some(PhoneNumberDomain::parse(phone)?.inner()),
            _ => None
        };

        Ok(NewAccount{
            email: UserEmail::parse(form.email)?,
            password: AccountPassword::parse(form.password)?,
            first_name: BoundedText::parse(form.first_name, "fname", MAX_PERSON_NAME_CHARS)?.into_inner(),
            last_name: BoundedText::parse(form.last_name, "lname", MAX_PERSON_NAME_CHARS)?.into_inner(),
            phone,
            role: ROLE_CLIENT
        })
    }
}

// Self-service accounts are always clients
#[tracing::instrument(
    "User signup started",
    skip(pool, tokenizer, form),
    fields(email = %form.email)
)]
pub async fn signup(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Json<SignupForm>
) -> Result<HttpResponse, AuthRouteError>{
    let account = NewAccount::try_from(form.into_inner())
        .map_err(AuthRouteError::ValidationError)?;

    let conn = get_pooled_connection(&pool).await?;
    let user = insert_user(conn, account).await?;

    session_response(StatusCode::CREATED, "User created successfully", &tokenizer, user)
}
