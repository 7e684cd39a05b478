use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    configuration::SeedSettings,
    db_interaction::{count_users, insert_menu_category, insert_menu_item, insert_table, insert_user, NewAccount},
    domain::{AccountPassword, UserEmail},
    models::{NewDiningTable, NewMenuItem, ROLE_ADMIN},
    utils::DbPool
};

const DEMO_TABLES: [(&str, i32); 5] = [
    ("Table 1", 2),
    ("Table 2", 2),
    ("Table 3", 4),
    ("Table 4", 4),
    ("Table 5", 6)
];

// (category, dish, description, price)
const DEMO_MENU: [(&str, &str, &str, f64); 4] = [
    ("Entrées", "Salade César", "Laitue romaine, croûtons, parmesan, poulet grillé et sauce César maison", 12.50),
    ("Plats", "Entrecôte grillée", "Entrecôte de bœuf 300g, frites maison et sauce au poivre", 24.90),
    ("Desserts", "Tiramisu", "Tiramisu traditionnel au café et amaretto", 8.50),
    ("Boissons", "Eau minérale (50cl)", "Eau plate ou gazeuse", 3.50)
];

/// Fills an empty database with an admin account, the dining room and a
/// small menu. Does nothing once any account exists.
#[tracing::instrument(
    "Seeding demo data",
    skip_all
)]
pub async fn seed_demo_data(pool: &DbPool, settings: &SeedSettings) -> Result<(), anyhow::Error> {
    if count_users(pool.get()?).await? > 0 {
        tracing::info!("Accounts already exist, skipping seed");
        return Ok(())
    }

    let admin = NewAccount{
        email: UserEmail::parse(settings.admin_email.clone())
            .map_err(anyhow::Error::msg)
            .context("Invalid seed admin email")?,
        password: AccountPassword::parse(SecretString::from(settings.admin_password.expose_secret().to_string()))
            .map_err(anyhow::Error::msg)
            .context("Invalid seed admin password")?,
        first_name: "Admin".to_string(),
        last_name: "Restaurant".to_string(),
        phone: None,
        role: ROLE_ADMIN
    };

    insert_user(pool.get()?, admin)
        .await
        .context("Failed to create seed admin")?;

    for (name, seats) in DEMO_TABLES {
        insert_table(pool.get()?, NewDiningTable{ name: name.to_string(), seats })
            .await
            .context("Failed to create seed table")?;
    }

    for (category, name, description, price) in DEMO_MENU {
        let category = insert_menu_category(pool.get()?, category.to_string())
            .await
            .context("Failed to create seed menu category")?;

        let item = NewMenuItem{
            name: name.to_string(),
            description: Some(description.to_string()),
            price,
            category_id: category.id,
            image_url: None
        };

        insert_menu_item(pool.get()?, item)
            .await
            .context("Failed to create seed menu item")?;
    }

    tracing::info!("Demo data inserted");
    Ok(())
}
