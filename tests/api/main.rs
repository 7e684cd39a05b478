mod accounts;
mod helpers;
mod reservations;
