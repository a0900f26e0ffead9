pub mod auth;
pub mod errors;
pub mod logging;
pub mod rate_limit;
pub mod security;
pub mod validation;
