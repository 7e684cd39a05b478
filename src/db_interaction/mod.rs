mod menu;
mod reservations;
mod tables;
mod user;

pub use menu::*;
pub use reservations::*;
pub use tables::*;
pub use user::*;
