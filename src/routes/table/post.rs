use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::insert_table,
    domain::TableSeats,
    models::NewDiningTable,
    utils::{get_pooled_connection, DbPool}
};

use super::{parse_table_name, TableRouteError};

#[derive(Deserialize, Debug)]
pub struct TableForm{
    name: String,
    seats: i32
}

#[tracing::instrument(
    "Posting dining table",
    skip(pool)
)]
pub async fn post_dining_table(
    pool: web::Data<DbPool>,
    form: web::Json<TableForm>,
    _: IsAdmin
) -> Result<HttpResponse, TableRouteError>{
    let form = form.into_inner();

    let seats = TableSeats::parse(form.seats)
        .map_err(TableRouteError::ValidationError)?;

    let table = NewDiningTable{
        name: parse_table_name(form.name)?,
        seats: seats.get()
    };

    let conn = get_pooled_connection(&pool).await?;
    let table = insert_table(conn, table).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Table added successfully",
        "table": table
    })))
}
