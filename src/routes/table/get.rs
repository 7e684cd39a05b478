use actix_web::{web, HttpResponse};

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::get_tables,
    utils::{get_pooled_connection, DbPool}
};

use super::TableRouteError;

#[tracing::instrument(
    "Getting dining tables",
    skip(pool)
)]
pub async fn get_dining_tables(
    pool: web::Data<DbPool>,
    _: IsAdmin
) -> Result<HttpResponse, TableRouteError>{
    let conn = get_pooled_connection(&pool).await?;

    Ok(HttpResponse::Ok().json(get_tables(conn).await?))
}
