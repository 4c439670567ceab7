pub mod reset_requests;
pub mod users;
