//! Database models split into domain-specific modules.

pub mod booking;
pub mod driver;
pub mod organization;
pub mod user;

pub use booking::*;
pub use driver::*;
pub use organization::*;
pub use user::*;
