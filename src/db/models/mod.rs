//! Database models split into domain-specific modules.

pub mod favorite;
pub mod person;
pub mod planet;
pub mod user;

pub use favorite::*;
pub use person::*;
pub use planet::*;
pub use user::*;
