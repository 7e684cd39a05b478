use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::update_table,
    domain::TableSeats,
    models::DiningTableChanges,
    utils::{get_pooled_connection, DbPool}
};

use super::{parse_table_name, TableRouteError};

#[derive(Deserialize, Debug)]
pub struct TableUpdateForm{
    name: Option<String>,
    seats: Option<i32>
}

#[tracing::instrument(
    "Updating dining table",
    skip(pool)
)]
pub async fn put_dining_table(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<TableUpdateForm>,
    _: IsAdmin
) -> Result<HttpResponse, TableRouteError>{
    let form = form.into_inner();

    let changes = DiningTableChanges{
        name: form.name.map(parse_table_name).transpose()?,
        seats: form.seats
            .map(TableSeats::parse)
            .transpose()
            .map_err(TableRouteError::ValidationError)?
            .map(|seats| seats.get())
    };

    let conn = get_pooled_connection(&pool).await?;
    let table = update_table(conn, path.into_inner(), changes).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Table updated successfully",
        "table": table
    })))
}
