use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{
    auth::extractors::IsAdmin,
    db_interaction::insert_menu_item,
    models::NewMenuItem,
    utils::{get_pooled_connection, DbPool}
};

use super::{parse_description, parse_image_url, parse_item_name, parse_price, MenuRouteError};

#[derive(Deserialize, Debug)]
pub struct MenuItemForm{
    name: String,
    description: Option<String>,
    price: f64,
    category_id: i32,
    image_url: Option<String>
}

#[tracing::instrument(
    "Posting menu item",
    skip(pool)
)]
pub async fn post_menu_item(
    pool: web::Data<DbPool>,
    form: web::Json<MenuItemForm>,
    _: IsAdmin
) -> Result<HttpResponse, MenuRouteError>{
    let form = form.into_inner();

    let item = NewMenuItem{
        name: parse_item_name(form.name)?,
        description: parse_description(form.description)?,
        price: parse_price(form.price)?,
        category_id: form.category_id,
        image_url: parse_image_url(form.image_url)?
    };

    let conn = get_pooled_connection(&pool).await?;
    let item = insert_menu_item(conn, item).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Menu item added successfully",
        "item": item
    })))
}
