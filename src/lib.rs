//! bricklink-client - Async client for the BrickLink store API
//!
//! Every request is signed with OAuth 1.0a (HMAC-SHA1). Responses are decoded from
//! the BrickLink JSON envelope into typed models, with compact wire codes mapped to
//! domain enums.

pub mod bricklink;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod oauth;

pub use bricklink::{BricklinkApi, BricklinkClient, Completeness, PartOutItemType, PartOutValue};
pub use config::Config;
pub use error::{BricklinkError, ErrorKind, Result};
pub use oauth::Credentials;
