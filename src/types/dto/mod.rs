// DTOs - request and response bodies
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod role;
pub mod site;
pub mod timezone;
pub mod user;
