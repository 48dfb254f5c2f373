//! Authentication and authorization module

pub mod codec;
pub mod middleware;
pub mod password;
pub mod revocation;

pub use codec::{Claims, TokenCodec};
pub use middleware::{auth_gate_middleware, extract_token, require_admin, AuthContext};
pub use password::CredentialVerifier;
pub use revocation::RevocationStore;
