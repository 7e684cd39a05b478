use actix_web::{web, HttpResponse};

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::confirm_reservation,
    utils::{get_pooled_connection, DbPool}
};

use super::ReservationRouteError;

#[tracing::instrument(
    "Confirming reservation",
    skip(pool)
)]
pub async fn validate_reservation(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    _: IsAdmin
) -> Result<HttpResponse, ReservationRouteError>{
    let conn = get_pooled_connection(&pool).await?;
    let id = confirm_reservation(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Reservation confirmed successfully",
        "id": id
    })))
}
