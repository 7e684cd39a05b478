use actix_web::{web, HttpResponse};

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::delete_menu_item,
    utils::{get_pooled_connection, DbPool}
};

use super::MenuRouteError;

#[tracing::instrument(
    "Deleting menu item",
    skip(pool)
)]
pub async fn delete_menu_entry(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    _: IsAdmin
) -> Result<HttpResponse, MenuRouteError>{
    let item_id = path.into_inner();
    let conn = get_pooled_connection(&pool).await?;

    delete_menu_item(conn, item_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Menu item deleted successfully",
        "id": item_id
    })))
}
