use actix_web::{web, HttpResponse};

use crate::{
    db_interaction::{get_menu, get_menu_item},
    utils::{get_pooled_connection, DbPool}
};

use super::MenuRouteError;

#[tracing::instrument(
    "Getting menu",
    skip(pool)
)]
pub async fn get_full_menu(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, MenuRouteError>{
    let conn = get_pooled_connection(&pool).await?;

    Ok(HttpResponse::Ok().json(get_menu(conn).await?))
}

#[tracing::instrument(
    "Getting menu item",
    skip(pool)
)]
pub async fn get_single_menu_item(
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, MenuRouteError>{
    let conn = get_pooled_connection(&pool).await?;

    Ok(HttpResponse::Ok().json(get_menu_item(conn, path.into_inner()).await?))
}
