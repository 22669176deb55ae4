// Staff authentication: argon2 password hashes, HS256 bearer tokens,
// and a Redis-backed revocation list for logout.

pub mod handlers;
pub mod password;
pub mod revocation;
pub mod session;
pub mod token;

pub use revocation::{RedisRevocationStore, RevocationStore};
pub use session::Session;
pub use token::TokenIssuer;
