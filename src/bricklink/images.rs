//! Catalog image URLs on the BrickLink image host.

use crate::error::{BricklinkError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

pub const IMAGE_HOST: &str = "img.bricklink.com";

/// URL scheme used for image links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageScheme {
    Http,
    #[default]
    Https,
}

impl ImageScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageScheme::Http => "http",
            ImageScheme::Https => "https",
        }
    }
}

impl FromStr for ImageScheme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(ImageScheme::Http),
            "https" => Ok(ImageScheme::Https),
            _ => Err(format!("Unknown scheme: {}. Use: http, https", s)),
        }
    }
}

impl fmt::Display for ImageScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn item_image(kind: &str, color_id: u32, number: &str, scheme: ImageScheme) -> Result<Url> {
    let number = number.trim();
    if number.is_empty() {
        return Err(BricklinkError::configuration("Item number must not be empty"));
    }

    let raw = format!("{}://{}/ItemImage/{}/{}/{}.png", scheme, IMAGE_HOST, kind, color_id, number);
    Url::parse(&raw).map_err(|e| BricklinkError::configuration(format!("Invalid image URL {}: {}", raw, e)))
}

/// Image of a part in a specific colour.
pub fn part_image_for_color(part_no: &str, color_id: u32, scheme: ImageScheme) -> Result<Url> {
    item_image("PN", color_id, part_no, scheme)
}

/// Image of a minifig.
pub fn minifig_image(number: &str, scheme: ImageScheme) -> Result<Url> {
    item_image("MN", 0, number, scheme)
}

/// Image of a set.
pub fn set_image(number: &str, scheme: ImageScheme) -> Result<Url> {
    item_image("SN", 0, number, scheme)
}

/// Turns a scheme-relative URL (`//img.bricklink.com/...`), as returned by the API in
/// `image_url`/`thumbnail_url` fields, into an absolute one.
pub fn ensure_image_url_scheme(url: &str, scheme: ImageScheme) -> Result<Url> {
    let url = url.trim();
    let raw = if url.starts_with("//") {
        format!("{}:{}", scheme, url)
    } else if let Some((_, rest)) = url.split_once("://") {
        format!("{}://{}", scheme, rest)
    } else {
        format!("{}://{}", scheme, url)
    };

    Url::parse(&raw).map_err(|e| BricklinkError::configuration(format!("Invalid image URL {}: {}", url, e)))
}
