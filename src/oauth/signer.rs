//! OAuth 1.0a HMAC-SHA1 request signing.

use super::credentials::Credentials;
use super::encoding::percent_encode;
use super::nonce::NonceSource;
use crate::error::{BricklinkError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::fmt;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";
pub const AUTH_SCHEME: &str = "OAuth";

/// `Authorization` header split into its scheme and parameter parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHeader {
    pub scheme: String,
    pub parameter: String,
}

impl fmt::Display for AuthorizationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.scheme, self.parameter)
    }
}

/// A single request to be signed: credentials, HTTP method and absolute URL.
///
/// Query parameters already on the URL take part in the signature.
#[derive(Debug)]
pub struct OAuthRequest<'a> {
    credentials: &'a Credentials,
    method: String,
    url: Url,
}

impl<'a> OAuthRequest<'a> {
    pub fn new(credentials: &'a Credentials, url: &str, method: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| BricklinkError::configuration(format!("Invalid request URL {}: {}", url, e)))?;

        if !url.has_host() {
            return Err(BricklinkError::configuration(format!("Request URL has no host: {}", url)));
        }

        Ok(Self { credentials, method: method.to_uppercase(), url })
    }

    /// Signs the request with a fresh nonce and timestamp and renders the header.
    pub fn authorization_header(&self, nonces: &dyn NonceSource) -> Result<AuthorizationHeader> {
        let nonce = nonces.nonce();
        let timestamp = nonces.timestamp().to_string();

        let mut params = self.oauth_params(&nonce, &timestamp);
        params.push(("oauth_signature", self.signature(&nonce, &timestamp)?));
        params.sort();

        let parameter = params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(",");

        Ok(AuthorizationHeader { scheme: AUTH_SCHEME.to_string(), parameter })
    }

    /// HMAC-SHA1 of the signature base string, base64-encoded.
    pub fn signature(&self, nonce: &str, timestamp: &str) -> Result<String> {
        let mut mac = HmacSha1::new_from_slice(self.signing_key().as_bytes())
            .map_err(|e| BricklinkError::configuration(format!("Invalid signing key: {}", e)))?;
        mac.update(self.signature_base_string(nonce, timestamp).as_bytes());

        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// `METHOD&enc(base-url)&enc(parameter-string)`
    pub fn signature_base_string(&self, nonce: &str, timestamp: &str) -> String {
        format!(
            "{}&{}&{}",
            self.method,
            percent_encode(&self.base_url()),
            percent_encode(&self.parameter_string(nonce, timestamp))
        )
    }

    /// Encoded OAuth and query parameters, sorted by encoded key then encoded value.
    pub fn parameter_string(&self, nonce: &str, timestamp: &str) -> String {
        let mut pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| (percent_encode(&k).into_owned(), percent_encode(&v).into_owned()))
            .collect();

        pairs.extend(
            self.oauth_params(nonce, timestamp)
                .into_iter()
                .map(|(k, v)| (percent_encode(k).into_owned(), percent_encode(&v).into_owned())),
        );

        // Byte-wise ordering on the encoded form
        pairs.sort();

        pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect::<Vec<_>>().join("&")
    }

    fn signing_key(&self) -> String {
        format!(
            "{}&{}",
            percent_encode(self.credentials.consumer_secret()),
            percent_encode(self.credentials.token_secret())
        )
    }

    /// Scheme and authority lower-cased, default port dropped, no query or fragment.
    fn base_url(&self) -> String {
        let mut base = format!("{}://{}", self.url.scheme(), self.url.host_str().unwrap_or_default());
        if let Some(port) = self.url.port() {
            base.push_str(&format!(":{}", port));
        }
        base.push_str(self.url.path());
        base
    }

    fn oauth_params(&self, nonce: &str, timestamp: &str) -> Vec<(&'static str, String)> {
        vec![
            ("oauth_consumer_key", self.credentials.consumer_key().to_string()),
            ("oauth_nonce", nonce.to_string()),
            ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp", timestamp.to_string()),
            ("oauth_token", self.credentials.token_value().to_string()),
            ("oauth_version", OAUTH_VERSION.to_string()),
        ]
    }
}

/// Signs `method url` and returns the full `Authorization` header.
pub fn sign(
    credentials: &Credentials,
    url: &str,
    method: &str,
    nonces: &dyn NonceSource,
) -> Result<AuthorizationHeader> {
    OAuthRequest::new(credentials, url, method)?.authorization_header(nonces)
}
