mod authentication;
mod health_check;
mod menu;
mod profile;
mod reservation;
mod table;

pub use authentication::*;
pub use health_check::*;
pub use menu::*;
pub use profile::*;
pub use reservation::*;
pub use table::*;
