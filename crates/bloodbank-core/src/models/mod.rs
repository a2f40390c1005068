//! Domain models for the blood bank.

mod assessment;
mod blood;
mod donor;
mod request;
mod user;

pub use assessment::*;
pub use blood::*;
pub use donor::*;
pub use request::*;
pub use user::*;
