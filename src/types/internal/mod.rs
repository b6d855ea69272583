// Internal types - not exposed over the wire
pub mod auth;
pub mod context;
pub mod pagination;
pub mod validation;
