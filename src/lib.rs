pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod handler;
pub mod repository;
pub mod services;

// re-exports for ease
pub use repository::*;
pub use services::*;
