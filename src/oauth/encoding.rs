//! RFC 3986 percent-encoding as required by OAuth 1.0a.

use std::borrow::Cow;

/// Percent-encodes everything except the unreserved set `A-Za-z0-9-._~`.
///
/// Differs from form encoding: space becomes `%20`, never `+`, and `*` is encoded.
pub fn percent_encode(input: &str) -> Cow<'_, str> {
    urlencoding::encode(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreserved_unchanged() {
        let unreserved = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";
        assert_eq!(percent_encode(unreserved), unreserved);
    }

    #[test]
    fn test_reserved_encoded() {
        assert_eq!(percent_encode("/"), "%2F");
        assert_eq!(percent_encode(":"), "%3A");
        assert_eq!(percent_encode("&"), "%26");
        assert_eq!(percent_encode(" "), "%20");
        assert_eq!(percent_encode("="), "%3D");
        assert_eq!(percent_encode("+"), "%2B");
        assert_eq!(percent_encode("*"), "%2A");
        assert_eq!(percent_encode("%"), "%25");
        assert_eq!(percent_encode("!"), "%21");
    }

    #[test]
    fn test_url_encoded() {
        assert_eq!(
            percent_encode("https://api.bricklink.com/api/store/v1"),
            "https%3A%2F%2Fapi.bricklink.com%2Fapi%2Fstore%2Fv1"
        );
    }

    #[test]
    fn test_utf8_bytes_encoded() {
        assert_eq!(percent_encode("é"), "%C3%A9");
    }
}
