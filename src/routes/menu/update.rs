use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::update_menu_item,
    models::MenuItemChanges,
    utils::{get_pooled_connection, DbPool}
};

use super::{parse_description, parse_image_url, parse_item_name, parse_price, MenuRouteError};

#[derive(Deserialize, Debug)]
pub struct MenuItemUpdateForm{
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    category_id: Option<i32>,
    image_url: Option<String>
}

#[tracing::instrument(
    "Updating menu item",
    skip(pool)
)]
pub async fn put_menu_item(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<MenuItemUpdateForm>,
    _: IsAdmin
) -> Result<HttpResponse, MenuRouteError>{
    let form = form.into_inner();

    let changes = MenuItemChanges{
        name: form.name.map(parse_item_name).transpose()?,
        description: parse_description(form.description)?,
        price: form.price.map(parse_price).transpose()?,
        category_id: form.category_id,
        image_url: parse_image_url(form.image_url)?
    };

    let conn = get_pooled_connection(&pool).await?;
    let item = update_menu_item(conn, path.into_inner(), changes).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Menu item updated successfully",
        "item": item
    })))
}
