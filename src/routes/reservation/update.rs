use actix_web::{web, HttpResponse};
use chrono::Local;

use crate::{
    auth::extractors::AuthenticatedUser,
    configuration::BookingSettings,
    db_interaction::update_reservation,
    domain::ReservationChanges,
    utils::{get_pooled_connection, DbPool}
};

use super::{ReservationBody, ReservationRouteError};

#[tracing::instrument(
    "Updating reservation",
    skip(pool, body, booking, user),
    fields(user_id = %user.user_id)
)]
pub async fn put_reservation(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<ReservationBody>,
    booking: web::Data<BookingSettings>,
    user: AuthenticatedUser
) -> Result<HttpResponse, ReservationRouteError>{
    let reservation_id = path.into_inner();
    let today = Local::now().date_naive();

    let changes = ReservationChanges::parse(body.into_inner().into(), today, booking.max_party_size)
        .map_err(ReservationRouteError::ValidationError)?;

    let conn = get_pooled_connection(&pool).await?;
    let reservation = update_reservation(conn, reservation_id, user.owner_filter(), changes).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Reservation updated successfully",
        "reservation": reservation
    })))
}
