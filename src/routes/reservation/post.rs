use actix_web::{web, HttpResponse};
use chrono::Local;

use crate::{
    auth::extractors::AuthenticatedUser,
    configuration::BookingSettings,
    db_interaction::create_reservation,
    domain::ReservationDraft,
    utils::{get_pooled_connection, DbPool}
};

use super::{ReservationBody, ReservationRouteError};

#[tracing::instrument(
    "Posting reservation",
    skip(pool, body, booking),
    fields(user_id = %user.user_id)
)]
pub async fn post_reservation(
    pool: web::Data<DbPool>,
    body: web::Json<ReservationBody>,
    booking: web::Data<BookingSettings>,
    user: AuthenticatedUser
) -> Result<HttpResponse, ReservationRouteError>{
    let today = Local::now().date_naive();

    let draft = ReservationDraft::parse(body.into_inner().into(), today, booking.max_party_size)
        .map_err(ReservationRouteError::ValidationError)?;

    let conn = get_pooled_connection(&pool).await?;
    let reservation = create_reservation(conn, user.user_id, draft).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Reservation created successfully",
        "reservation": reservation
    })))
}
