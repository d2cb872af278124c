//! Typed payloads for BrickLink responses and request bodies.

use super::codecs::{Completeness, GuideType, ItemType, NewOrUsed, PartOutItemType, WireCode};
use super::envelope::Model;
use crate::error::{BricklinkError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn non_negative(path: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(BricklinkError::decode(path, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

/// Reference to a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRef {
    pub no: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
}

/// Aggregate resale value of an item if all its components were sold separately.
///
/// Zero values are valid (e.g. no sales in the last six months).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartOutValue {
    /// Average sales value over the last six months, USD
    pub average_six_month_sales_value: Decimal,
    /// Value at current store prices, USD
    pub current_sales_value: Decimal,
    pub included_items_count: u32,
    pub included_lots_count: u32,
}

impl PartOutValue {
    /// Creates a part-out value, rejecting negative amounts.
    pub fn new(
        average_six_month_sales_value: Decimal,
        current_sales_value: Decimal,
        included_items_count: u32,
        included_lots_count: u32,
    ) -> Result<Self> {
        let value = Self {
            average_six_month_sales_value,
            current_sales_value,
            included_items_count,
            included_lots_count,
        };
        value.validate()?;
        Ok(value)
    }

    /// True when every figure is zero, which usually means the item has no part-out data.
    pub fn is_empty(&self) -> bool {
        self.average_six_month_sales_value.is_zero()
            && self.current_sales_value.is_zero()
            && self.included_items_count == 0
            && self.included_lots_count == 0
    }
}

impl Model for PartOutValue {
    fn validate(&self) -> Result<()> {
        non_negative("data.average_six_month_sales_value", self.average_six_month_sales_value)?;
        non_negative("data.current_sales_value", self.current_sales_value)
    }
}

/// Options for a part-out valuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartOutQuery {
    pub item_type: PartOutItemType,
    pub condition: NewOrUsed,
    /// Count minifigs as a single lot instead of parting them out
    pub break_minifigs: bool,
    /// Part out sets contained in the set
    pub break_sets_in_set: bool,
    pub include_instructions: bool,
    pub include_box: bool,
    pub include_extra_parts: bool,
}

impl Default for PartOutQuery {
    fn default() -> Self {
        Self {
            item_type: PartOutItemType::Set,
            condition: NewOrUsed::New,
            break_minifigs: false,
            break_sets_in_set: false,
            include_instructions: true,
            include_box: false,
            include_extra_parts: false,
        }
    }
}

impl PartOutQuery {
    pub fn new(item_type: PartOutItemType) -> Self {
        Self { item_type, ..Self::default() }
    }

    /// Query parameters, with the sequence number taken from the item number.
    pub fn to_params(&self, item_seq: u32) -> Vec<(&'static str, String)> {
        let flag = |b: bool| String::from(if b { "Y" } else { "N" });
        vec![
            ("item_seq", item_seq.to_string()),
            ("condition", self.condition.code().to_string()),
            ("break_minifigs", flag(self.break_minifigs)),
            ("break_sets_in_set", flag(self.break_sets_in_set)),
            ("include_instructions", flag(self.include_instructions)),
            ("include_box", flag(self.include_box)),
            ("include_extra_parts", flag(self.include_extra_parts)),
        ]
    }
}

/// Splits `"1610-2"` into `("1610", 2)`; a missing or non-numeric suffix means sequence 1.
pub fn split_item_sequence(item_no: &str) -> (&str, u32) {
    match item_no.rsplit_once('-') {
        Some((no, seq)) if !no.is_empty() => match seq.parse::<u32>() {
            Ok(seq) if seq > 0 => (no, seq),
            _ => (item_no, 1),
        },
        _ => (item_no, 1),
    }
}

/// Filters for a price guide lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PriceGuideQuery {
    pub color_id: Option<u32>,
    pub guide_type: GuideType,
    pub new_or_used: NewOrUsed,
    pub country_code: Option<String>,
    pub currency_code: Option<String>,
}

impl PriceGuideQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("guide_type", self.guide_type.code().to_string()),
            ("new_or_used", self.new_or_used.code().to_string()),
        ];
        if let Some(color_id) = self.color_id {
            params.push(("color_id", color_id.to_string()));
        }
        if let Some(country) = &self.country_code {
            params.push(("country_code", country.clone()));
        }
        if let Some(currency) = &self.currency_code {
            params.push(("currency_code", currency.clone()));
        }
        params
    }
}

/// Price statistics for one item, colour and condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceGuide {
    pub item: ItemRef,
    pub new_or_used: NewOrUsed,
    pub currency_code: String,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub avg_price: Decimal,
    pub qty_avg_price: Decimal,
    pub unit_quantity: u32,
    pub total_quantity: u32,
    #[serde(default)]
    pub price_detail: Vec<PriceDetail>,
}

impl Model for PriceGuide {
    fn validate(&self) -> Result<()> {
        non_negative("data.min_price", self.min_price)?;
        non_negative("data.max_price", self.max_price)?;
        non_negative("data.avg_price", self.avg_price)?;
        non_negative("data.qty_avg_price", self.qty_avg_price)?;
        for (i, detail) in self.price_detail.iter().enumerate() {
            non_negative(&format!("data.price_detail[{}].unit_price", i), detail.unit_price)?;
        }
        Ok(())
    }
}

/// A single sale or listing behind a price guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDetail {
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_ordered: Option<String>,
}

/// A lot in the authenticated user's store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub inventory_id: u64,
    pub item: ItemRef,
    pub color_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_name: Option<String>,
    pub quantity: u32,
    pub new_or_used: NewOrUsed,
    /// Only present for sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completeness: Option<Completeness>,
    pub unit_price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub is_retain: bool,
    #[serde(default)]
    pub is_stock_room: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
}

impl Model for Inventory {
    fn validate(&self) -> Result<()> {
        non_negative("data.unit_price", self.unit_price)
    }
}

/// Fields to change on an inventory lot. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateInventory {
    /// Signed change to the quantity
    #[serde(rename = "quantity", skip_serializing_if = "Option::is_none")]
    pub quantity_delta: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completeness: Option<Completeness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_retain: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_stock_room: Option<bool>,
}

impl UpdateInventory {
    pub fn validate(&self) -> Result<()> {
        if let Some(price) = self.unit_price {
            if price < Decimal::ZERO {
                return Err(BricklinkError::configuration(format!(
                    "unit_price must not be negative, got {}",
                    price
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bricklink::envelope::parse_response;
    use crate::error::ErrorKind;
    use rust_decimal_macros::dec;

    #[test]
    fn test_part_out_value_new() {
        let value = PartOutValue::new(dec!(81.12), dec!(95.40), 168, 43).unwrap();
        assert_eq!(value.included_items_count, 168);
        assert!(!value.is_empty());
    }

    #[test]
    fn test_part_out_value_zero_is_valid() {
        let value = PartOutValue::new(Decimal::ZERO, Decimal::ZERO, 0, 0).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_part_out_value_negative_rejected() {
        let err = PartOutValue::new(dec!(1), dec!(-0.01), 1, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().contains("current_sales_value"));
    }

    #[test]
    fn test_part_out_value_decodes_strings_and_numbers() {
        let body = r#"{"meta":{"code":200,"message":"OK","description":"OK"},
            "data":{"average_six_month_sales_value":"81.1200","current_sales_value":95,
                    "included_items_count":168,"included_lots_count":43}}"#;
        let value: PartOutValue = parse_response(body).unwrap();
        assert_eq!(value.average_six_month_sales_value, dec!(81.12));
        assert_eq!(value.current_sales_value, dec!(95));
    }

    #[test]
    fn test_part_out_value_negative_count_is_decode_error() {
        let body = r#"{"meta":{"code":200,"message":"OK","description":"OK"},
            "data":{"average_six_month_sales_value":"1","current_sales_value":"1",
                    "included_items_count":-3,"included_lots_count":1}}"#;
        let err = parse_response::<PartOutValue>(body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_split_item_sequence() {
        assert_eq!(split_item_sequence("1610"), ("1610", 1));
        assert_eq!(split_item_sequence("1610-2"), ("1610", 2));
        assert_eq!(split_item_sequence("aqu017-1"), ("aqu017", 1));
        assert_eq!(split_item_sequence("6043191-1"), ("6043191", 1));
        assert_eq!(split_item_sequence("aqu017"), ("aqu017", 1));
        assert_eq!(split_item_sequence("sw-abc"), ("sw-abc", 1));
        assert_eq!(split_item_sequence("-1"), ("-1", 1));
        assert_eq!(split_item_sequence("1610-0"), ("1610-0", 1));
    }

    #[test]
    fn test_part_out_query_params() {
        let query = PartOutQuery { include_box: true, ..PartOutQuery::new(PartOutItemType::Minifig) };
        let params = query.to_params(2);

        assert!(params.contains(&("item_seq", "2".to_string())));
        assert!(params.contains(&("condition", "N".to_string())));
        assert!(params.contains(&("include_box", "Y".to_string())));
        assert!(params.contains(&("break_minifigs", "N".to_string())));
        assert!(params.contains(&("include_instructions", "Y".to_string())));
    }

    #[test]
    fn test_price_guide_query_params() {
        let query = PriceGuideQuery {
            color_id: Some(10),
            guide_type: GuideType::Sold,
            new_or_used: NewOrUsed::Used,
            country_code: None,
            currency_code: Some("EUR".to_string()),
        };
        let params = query.to_params();

        assert_eq!(params[0], ("guide_type", "sold".to_string()));
        assert_eq!(params[1], ("new_or_used", "U".to_string()));
        assert!(params.contains(&("color_id", "10".to_string())));
        assert!(params.contains(&("currency_code", "EUR".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "country_code"));
    }

    #[test]
    fn test_price_guide_decode() {
        let body = r#"{"meta":{"code":200,"message":"OK","description":"OK"},"data":{
            "item":{"no":"3001","type":"PART"},"new_or_used":"N","currency_code":"USD",
            "min_price":"0.0100","max_price":"2.5000","avg_price":"0.2114","qty_avg_price":"0.1789",
            "unit_quantity":1520,"total_quantity":48213,
            "price_detail":[{"quantity":12,"unit_price":"0.1500","shipping_available":true}]}}"#;
        let guide: PriceGuide = parse_response(body).unwrap();

        assert_eq!(guide.item.item_type, ItemType::Part);
        assert_eq!(guide.new_or_used, NewOrUsed::New);
        assert_eq!(guide.avg_price, dec!(0.2114));
        assert_eq!(guide.price_detail.len(), 1);
        assert_eq!(guide.price_detail[0].shipping_available, Some(true));
    }

    #[test]
    fn test_price_guide_negative_detail_rejected() {
        let body = r#"{"meta":{"code":200,"message":"OK","description":"OK"},"data":{
            "item":{"no":"3001","type":"PART"},"new_or_used":"N","currency_code":"USD",
            "min_price":"0","max_price":"0","avg_price":"0","qty_avg_price":"0",
            "unit_quantity":0,"total_quantity":0,
            "price_detail":[{"quantity":1,"unit_price":"-1.00"}]}}"#;
        let err = parse_response::<PriceGuide>(body).unwrap_err();
        assert!(err.to_string().contains("data.price_detail[0].unit_price"));
    }

    #[test]
    fn test_inventory_decode_completeness() {
        let body = r#"{"meta":{"code":200,"message":"OK","description":"OK"},"data":{
            "inventory_id":50592684,"item":{"no":"6090-1","name":"Royal Knight's Castle","type":"SET","category_id":45},
            "color_id":0,"quantity":1,"new_or_used":"U","completeness":"B","unit_price":"199.0000"}}"#;
        let inventory: Inventory = parse_response(body).unwrap();

        assert_eq!(inventory.completeness, Some(Completeness::Incomplete));
        assert_eq!(inventory.item.name.as_deref(), Some("Royal Knight's Castle"));
        assert!(inventory.remarks.is_empty());
    }

    #[test]
    fn test_update_inventory_serializes_only_set_fields() {
        let update = UpdateInventory {
            quantity_delta: Some(-2),
            completeness: Some(Completeness::Sealed),
            unit_price: Some(dec!(12.50)),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json["quantity"], -2);
        assert_eq!(json["completeness"], "S");
        assert_eq!(json["unit_price"], "12.50");
        assert!(json.get("remarks").is_none());
    }

    #[test]
    fn test_update_inventory_negative_price() {
        let update = UpdateInventory { unit_price: Some(dec!(-1)), ..Default::default() };
        assert_eq!(update.validate().unwrap_err().kind(), ErrorKind::Configuration);
    }
}
