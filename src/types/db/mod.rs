// Database entities - SeaORM models
pub mod role;
pub mod site;
pub mod status;
pub mod user;

pub use status::Status;
