use actix_web::{web, HttpResponse};

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::delete_table,
    utils::{get_pooled_connection, DbPool}
};

use super::TableRouteError;

#[tracing::instrument(
    "Deleting dining table",
    skip(pool)
)]
pub async fn delete_dining_table(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    _: IsAdmin
) -> Result<HttpResponse, TableRouteError>{
    let table_id = path.into_inner();
    let conn = get_pooled_connection(&pool).await?;

    delete_table(conn, table_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Table deleted successfully",
        "id": table_id
    })))
}
