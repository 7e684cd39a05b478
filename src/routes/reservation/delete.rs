use actix_web::{web, HttpResponse};

use crate::{
    auth::extractors::AuthenticatedUser,
    db_interaction::cancel_reservation,
    utils::{get_pooled_connection, DbPool}
};

use super::ReservationRouteError;

// Cancels rather than deletes; the row and its released tables stay
#[tracing::instrument(
    "Cancelling reservation",
    skip(pool, user),
    fields(user_id = %user.user_id)
)]
pub async fn delete_reservation(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    user: AuthenticatedUser
) -> Result<HttpResponse, ReservationRouteError>{
    let conn = get_pooled_connection(&pool).await?;
    let id = cancel_reservation(conn, path.into_inner(), user.owner_filter()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Reservation cancelled successfully",
        "id": id
    })))
}
