pub mod auth_service;
pub mod computer_service;
pub mod error;
pub mod jwt_service;

pub use error::ServiceError;
