pub mod ack;
pub mod blog;
pub mod donation_request;
pub mod user;
pub mod validation;

pub use ack::*;
pub use blog::*;
pub use donation_request::*;
pub use user::*;
