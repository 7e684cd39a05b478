use actix_web::{web, HttpResponse};

use crate::{
    auth::extractors::{AuthenticatedUser, IsAdmin},
    db_interaction::{list_reservations, list_reservations_with_owners},
    utils::{get_pooled_connection, DbPool}
};

use super::ReservationRouteError;

#[tracing::instrument(
    "Getting all reservations",
    skip(pool)
)]
pub async fn get_reservations(
    pool: web::Data<DbPool>,
    _: IsAdmin
) -> Result<HttpResponse, ReservationRouteError>{
    let conn = get_pooled_connection(&pool).await?;
    let reservations = list_reservations_with_owners(conn).await?;

    Ok(HttpResponse::Ok().json(reservations))
}

#[tracing::instrument(
    "Getting reservations of logged in user",
    skip(pool, user),
    fields(user_id = %user.user_id)
)]
pub async fn get_my_reservations(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser
) -> Result<HttpResponse, ReservationRouteError>{
    let conn = get_pooled_connection(&pool).await?;
    let reservations = list_reservations(conn, Some(user.user_id)).await?;

    Ok(HttpResponse::Ok().json(reservations))
}
