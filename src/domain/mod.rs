pub mod computer;
pub mod user;

pub use computer::{ComputerCode, ComputerStatus};
pub use user::{Email, Password, Role};
