// Request authentication and the permission gate
pub mod authenticator;
pub mod permissions;

pub use authenticator::Authenticator;
pub use permissions::require_permissions;
