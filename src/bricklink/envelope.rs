//! The `{"meta": ..., "data": ...}` envelope wrapping every BrickLink response.

use crate::error::{BricklinkError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

/// Status block of a response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Meta {
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub description: String,
}

impl Meta {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    meta: Meta,
    #[serde(default)]
    data: serde_json::Value,
}

/// A decoded payload that can check its own invariants.
pub trait Model: DeserializeOwned {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Decodes a response body into `T`.
///
/// Error envelopes become [`BricklinkError::UpstreamRequest`]; bodies that are not an
/// envelope, or whose `data` does not match `T`, become [`BricklinkError::Decode`].
/// The decode path is `$` for a body that is not JSON, `meta` for JSON without a
/// valid status block, and `data.<field>` for the field of `T` that failed.
pub fn parse_response<T: Model>(body: &str) -> Result<T> {
    let json: serde_json::Value =
        serde_json::from_str(body).map_err(|e| BricklinkError::decode("$", e.to_string()))?;
    let envelope: Envelope =
        serde_json::from_value(json).map_err(|e| BricklinkError::decode("meta", e.to_string()))?;

    if !envelope.meta.is_success() {
        let Meta { code, message, description } = envelope.meta;
        warn!("BrickLink returned {} {}: {}", code, message, description);
        return Err(BricklinkError::UpstreamRequest { code, message, description });
    }

    let model: T = serde_path_to_error::deserialize(envelope.data).map_err(|e| {
        let path = match e.path().to_string() {
            p if p == "." => "data".to_string(),
            p => format!("data.{}", p),
        };
        BricklinkError::decode(path, e.inner().to_string())
    })?;
    model.validate()?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Thing {
        name: String,
    }

    impl Model for Thing {}

    #[test]
    fn test_success_envelope() {
        let body = r#"{"meta":{"code":200,"message":"OK","description":"OK"},"data":{"name":"brick"}}"#;
        let thing: Thing = parse_response(body).unwrap();
        assert_eq!(thing.name, "brick");
    }

    #[test]
    fn test_error_envelope() {
        let body = r#"{"meta":{"code":404,"message":"RESOURCE_NOT_FOUND","description":"Item not found"},"data":{}}"#;
        let err = parse_response::<Thing>(body).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UpstreamRequest);
        match err {
            BricklinkError::UpstreamRequest { code, message, description } => {
                assert_eq!(code, 404);
                assert_eq!(message, "RESOURCE_NOT_FOUND");
                assert_eq!(description, "Item not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_envelope_without_data() {
        let body = r#"{"meta":{"code":400,"message":"PARAMETER_MISSING_OR_INVALID"}}"#;
        let err = parse_response::<Thing>(body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamRequest);
    }

    fn decode_path(err: BricklinkError) -> String {
        match err {
            BricklinkError::Decode { path, .. } => path,
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_not_an_envelope() {
        let err = parse_response::<Thing>("<html>Bad gateway</html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(decode_path(err), "$");

        let err = parse_response::<Thing>(r#"{"data":{"name":"brick"}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(decode_path(err), "meta");
    }

    #[test]
    fn test_data_shape_mismatch_names_field() {
        let body = r#"{"meta":{"code":200,"message":"OK","description":"OK"},"data":{"title":"x"}}"#;
        let err = parse_response::<Thing>(body).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Decode);
        let message = err.to_string();
        assert!(message.contains("data"));
        assert!(message.contains("name"));
    }

    #[derive(Debug, Deserialize)]
    struct Counted {
        #[allow(dead_code)]
        name: String,
        #[allow(dead_code)]
        count: u32,
    }

    impl Model for Counted {}

    #[test]
    fn test_data_wrong_type_names_field() {
        let body = r#"{"meta":{"code":200,"message":"OK","description":"OK"},"data":{"name":"brick","count":"many"}}"#;
        let err = parse_response::<Counted>(body).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(decode_path(err), "data.count");
    }

    #[test]
    fn test_part_out_bad_decimal_names_field() {
        let body = r#"{"meta":{"code":200,"message":"OK","description":"OK"},"data":{
            "average_six_month_sales_value":"81.12","current_sales_value":"abc",
            "included_items_count":168,"included_lots_count":43}}"#;
        let err = parse_response::<crate::bricklink::PartOutValue>(body).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().contains("data.current_sales_value"));
    }
}
