// Providers layer - Work performers
//
// Providers wrap a single capability (password hashing, token signing,
// upstream HTTP) behind a small API that services compose.

pub mod crypto_provider;
pub mod timezone_provider;
pub mod token_provider;

// Re-export providers for clean imports
pub use crypto_provider::CryptoProvider;
pub use timezone_provider::TimezoneProvider;
pub use token_provider::TokenProvider;
