//! OAuth 1.0a signing for BrickLink API requests.

pub mod credentials;
pub mod encoding;
pub mod nonce;
pub mod signer;

pub use credentials::Credentials;
pub use encoding::percent_encode;
pub use nonce::{FixedNonceSource, NonceSource, SystemNonceSource};
pub use signer::{sign, AuthorizationHeader, OAuthRequest};
