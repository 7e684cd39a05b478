mod account_password;
mod bounded_text;
mod menu_entry;
mod party_size;
mod phone_number;
mod reservation_request;
mod reservation_slot;
mod reservation_status;
mod table_seats;
mod user_email;

pub use account_password::AccountPassword;
pub use bounded_text::BoundedText;
pub use menu_entry::{ImageUrl, MenuPrice};
pub use party_size::PartySize;
pub use phone_number::PhoneNumberDomain;
pub use reservation_request::{ReservationChanges, ReservationDraft, ReservationFields, MAX_GUEST_NAME_CHARS, MAX_NOTE_CHARS};
pub use reservation_slot::{format_time, ReservationDate, ReservationTime, DATE_FORMAT};
pub use reservation_status::{ReservationStatus, StatusTransitionError};
pub use table_seats::{TableSeats, ALLOWED_TABLE_SEATS};
pub use user_email::UserEmail;
