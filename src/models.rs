use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{dining_tables, menu_categories, menu_items, reservation_tables, reservations, users};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLIENT: &str = "client";

#[derive(Queryable, Selectable, Insertable, Clone, Debug)]
#[diesel(table_name = users)]
pub struct User{
    pub user_id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

// Public view of an account, never carries the password hash
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile{
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "fname")]
    pub first_name: String,
    #[serde(rename = "lname")]
    pub last_name: String,
    pub phone: Option<String>,
    pub role: String
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile{
            id: user.user_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            role: user.role
        }
    }
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = dining_tables)]
pub struct DiningTable{
    pub id: i32,
    pub name: String,
    pub seats: i32
}

#[derive(Insertable, Debug)]
#[diesel(table_name = dining_tables)]
pub struct NewDiningTable{
    pub name: String,
    pub seats: i32
}

// Absent fields are left untouched
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = dining_tables)]
pub struct DiningTableChanges{
    pub name: Option<String>,
    pub seats: Option<i32>
}

impl DiningTableChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.seats.is_none()
    }
}

#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = reservations)]
pub struct Reservation{
    pub id: i32,
    pub user_id: Uuid,
    pub name: String,
    pub phone: String,
    pub number_of_people: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub note: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

#[derive(Insertable, Debug)]
#[diesel(table_name = reservations)]
pub struct NewReservation{
    pub user_id: Uuid,
    pub name: String,
    pub phone: String,
    pub number_of_people: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub note: Option<String>,
    pub status: String
}

#[derive(Insertable, Debug)]
#[diesel(table_name = reservation_tables)]
pub struct NewTableAssignment{
    pub reservation_id: i32,
    pub table_id: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = menu_categories)]
pub struct MenuCategory{
    pub id: i32,
    pub name: String
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = menu_items)]
pub struct MenuItem{
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: i32,
    pub image_url: Option<String>
}

#[derive(Insertable, Debug)]
#[diesel(table_name = menu_items)]
pub struct NewMenuItem{
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: i32,
    pub image_url: Option<String>
}

#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = menu_items)]
pub struct MenuItemChanges{
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i32>,
    pub image_url: Option<String>
}

impl MenuItemChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
            && self.image_url.is_none()
    }
}
