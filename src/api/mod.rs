pub mod auth;
pub mod computers;
pub mod health;
