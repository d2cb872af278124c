//! BrickLink-specific modules for the HTTP client, wire codecs, and data models.

pub mod client;
pub mod codecs;
pub mod envelope;
pub mod images;
pub mod models;

pub use client::{BricklinkApi, BricklinkClient};
pub use codecs::{Completeness, GuideType, ItemType, NewOrUsed, PartOutItemType, WireCode};
pub use images::ImageScheme;
pub use models::{
    Inventory, ItemRef, PartOutQuery, PartOutValue, PriceDetail, PriceGuide, PriceGuideQuery, UpdateInventory,
};
