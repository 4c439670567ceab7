mod reset_request;
mod user;

pub use reset_request::ResetRequest;
pub use user::User;
