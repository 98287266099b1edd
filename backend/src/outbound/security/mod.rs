//! Credential and token adapters: bcrypt password hashing and JWT bearer
//! tokens. Both are pure and stateless, so they are safely shared across
//! requests without locking.

mod bcrypt_hasher;
mod jwt_tokens;

pub use bcrypt_hasher::BcryptPasswordHasher;
pub use jwt_tokens::JwtTokenService;
