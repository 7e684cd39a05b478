use actix_web::{web, HttpResponse};

use crate::{
    auth::extractors::AuthenticatedUser,
    db_interaction::get_user_by_id,
    models::UserProfile,
    routes::AuthRouteError,
    utils::{get_pooled_connection, DbPool}
};

#[tracing::instrument(
    "Get profile data of logged in user",
    skip(pool, user),
    fields(user_id = %user.user_id)
)]
pub async fn get_profile(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser
) -> Result<HttpResponse, AuthRouteError>{
    let conn = get_pooled_connection(&pool).await?;

    let user = get_user_by_id(conn, user.user_id)
        .await?
        .ok_or(AuthRouteError::UserNotFound)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": UserProfile::from(user) })))
}
