use std::{collections::HashMap, error::Error, fmt::Debug};

use diesel::{
    result::DatabaseErrorKind, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl,
    SelectableHelper
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    models::{MenuCategory, MenuItem, MenuItemChanges, NewMenuItem},
    schema::{menu_categories, menu_items},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MenuSection{
    pub id: i32,
    pub name: String,
    pub items: Vec<MenuItem>
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MenuItemDetails{
    #[serde(flatten)]
    pub item: MenuItem,
    pub category_name: String
}

#[derive(Error)]
pub enum MenuStoreError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("Menu item {0} not found")]
    ItemNotFound(i32),
    #[error("Menu category {0} not found")]
    CategoryNotFound(i32)
}

impl Debug for MenuStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// A dangling category_id only shows up as a foreign key violation
fn map_category_violation(category_id: Option<i32>) -> impl FnOnce(diesel::result::Error) -> MenuStoreError {
    move |e| match (e, category_id) {
        (diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _), Some(id)) => {
            MenuStoreError::CategoryNotFound(id)
        },
        (e, _) => MenuStoreError::RunQueryError(e)
    }
}

#[tracing::instrument(
    "Getting menu",
    skip_all
)]
pub async fn get_menu(mut conn: DbConnection) -> Result<Vec<MenuSection>, MenuStoreError> {
    let res = spawn_blocking_with_tracing(move || {
        let categories = menu_categories::table
            .order((menu_categories::name.asc(), menu_categories::id.asc()))
            .select(MenuCategory::as_select())
            .load::<MenuCategory>(&mut conn)?;

        let items = menu_items::table
            .order((menu_items::name.asc(), menu_items::id.asc()))
            .select(MenuItem::as_select())
            .load::<MenuItem>(&mut conn)?;

        let mut by_category: HashMap<i32, Vec<MenuItem>> = HashMap::new();
        for item in items {
            by_category.entry(item.category_id).or_default().push(item);
        }

        Ok::<_, MenuStoreError>(
            categories.into_iter()
                .map(|category| MenuSection{
                    items: by_category.remove(&category.id).unwrap_or_default(),
                    id: category.id,
                    name: category.name
                })
                .collect()
        )
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting menu item",
    skip(conn)
)]
pub async fn get_menu_item(
    mut conn: DbConnection,
    item_id: i32
) -> Result<MenuItemDetails, MenuStoreError> {
    let res = spawn_blocking_with_tracing(move || {
        menu_items::table
            .inner_join(menu_categories::table)
            .filter(menu_items::id.eq(item_id))
            .select((MenuItem::as_select(), menu_categories::name))
            .first::<(MenuItem, String)>(&mut conn)
            .optional()?
            .map(|(item, category_name)| MenuItemDetails{ item, category_name })
            .ok_or(MenuStoreError::ItemNotFound(item_id))
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Inserting menu category",
    skip(conn)
)]
pub async fn insert_menu_category(
    mut conn: DbConnection,
    name: String
) -> Result<MenuCategory, MenuStoreError> {
    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(menu_categories::table)
            .values(menu_categories::name.eq(name))
            .returning(MenuCategory::as_returning())
            .get_result::<MenuCategory>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Inserting menu item",
    skip(conn)
)]
pub async fn insert_menu_item(
    mut conn: DbConnection,
    item: NewMenuItem
) -> Result<MenuItem, MenuStoreError> {
    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(menu_items::table)
            .values(&item)
            .returning(MenuItem::as_returning())
            .get_result::<MenuItem>(&mut conn)
            .map_err(map_category_violation(Some(item.category_id)))
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Updating menu item",
    skip(conn)
)]
pub async fn update_menu_item(
    mut conn: DbConnection,
    item_id: i32,
    changes: MenuItemChanges
) -> Result<MenuItem, MenuStoreError> {
    let res = spawn_blocking_with_tracing(move || {
        let updated = if changes.is_empty() {
            menu_items::table
                .find(item_id)
                .select(MenuItem::as_select())
                .first::<MenuItem>(&mut conn)
                .optional()?
        } else {
            diesel::update(menu_items::table.find(item_id))
                .set(&changes)
                .returning(MenuItem::as_returning())
                .get_result::<MenuItem>(&mut conn)
                .optional()
                .map_err(map_category_violation(changes.category_id))?
        };

        updated.ok_or(MenuStoreError::ItemNotFound(item_id))
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Deleting menu item",
    skip(conn)
)]
pub async fn delete_menu_item(
    mut conn: DbConnection,
    item_id: i32
) -> Result<(), MenuStoreError> {
    let deleted = spawn_blocking_with_tracing(move || {
        diesel::delete(menu_items::table.find(item_id)).execute(&mut conn)
    })
    .await??;

    if deleted == 0 {
        return Err(MenuStoreError::ItemNotFound(item_id))
    }

    Ok(())
}
