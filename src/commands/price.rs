//! Price guide command implementation.

use crate::bricklink::{BricklinkApi, BricklinkClient, ItemType, PriceGuideQuery};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::info;

/// Looks up the price guide of a catalog item.
pub struct PriceGuideCommand {
    config: Config,
    query: PriceGuideQuery,
}

impl PriceGuideCommand {
    /// Creates a new price guide command.
    pub fn new(config: Config, query: PriceGuideQuery) -> Self {
        Self { config, query }
    }

    /// Fetches the price guide and returns formatted output.
    pub async fn execute(&self, item_type: ItemType, item_no: &str) -> Result<String> {
        let client =
            BricklinkClient::new(self.config.clone()).context("Failed to create BrickLink client")?;

        self.execute_with_client(&client, item_type, item_no).await
    }

    /// Fetches the price guide with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl BricklinkApi,
        item_type: ItemType,
        item_no: &str,
    ) -> Result<String> {
        info!("Price guide for: {} {}", item_type, item_no);

        let guide = client
            .get_price_guide(item_type, item_no, &self.query)
            .await
            .with_context(|| format!("Price guide lookup failed for {} {}", item_type, item_no))?;

        Ok(Formatter::new(self.config.format).format_price_guide(&guide))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bricklink::{
        GuideType, Inventory, ItemRef, NewOrUsed, PartOutQuery, PartOutValue, PriceGuide,
        UpdateInventory,
    };
    use crate::config::OutputFormat;
    use crate::error::{BricklinkError, ErrorKind, Result as ApiResult};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    /// Mock client that echoes the requested item back in the guide.
    struct MockBricklinkClient {
        should_fail: bool,
    }

    #[async_trait]
    impl BricklinkApi for MockBricklinkClient {
        async fn get_part_out_value(&self, _item_no: &str, _query: &PartOutQuery) -> ApiResult<PartOutValue> {
            unimplemented!()
        }

        async fn get_price_guide(
            &self,
            item_type: ItemType,
            item_no: &str,
            query: &PriceGuideQuery,
        ) -> ApiResult<PriceGuide> {
            if self.should_fail {
                return Err(BricklinkError::decode("data", "missing field `avg_price`"));
            }

            Ok(PriceGuide {
                item: ItemRef { no: item_no.to_string(), item_type, name: None, category_id: None },
                new_or_used: query.new_or_used,
                currency_code: query.currency_code.clone().unwrap_or_else(|| "USD".to_string()),
                min_price: dec!(0.01),
                max_price: dec!(1.00),
                avg_price: dec!(0.25),
                qty_avg_price: dec!(0.20),
                unit_quantity: 10,
                total_quantity: 100,
                price_detail: Vec::new(),
            })
        }

        async fn get_inventory(&self, _inventory_id: u64) -> ApiResult<Inventory> {
            unimplemented!()
        }

        async fn update_inventory(&self, _inventory_id: u64, _update: &UpdateInventory) -> ApiResult<Inventory> {
            unimplemented!()
        }
    }

    fn make_command(query: PriceGuideQuery) -> PriceGuideCommand {
        PriceGuideCommand::new(Config::with_credentials("ck", "cs", "tv", "ts"), query)
    }

    #[tokio::test]
    async fn test_price_command_passes_query() {
        let query = PriceGuideQuery {
            guide_type: GuideType::Sold,
            new_or_used: NewOrUsed::Used,
            currency_code: Some("EUR".to_string()),
            ..Default::default()
        };
        let output = make_command(query)
            .execute_with_client(&MockBricklinkClient { should_fail: false }, ItemType::Part, "3001")
            .await
            .unwrap();

        assert!(output.contains("PART 3001 (U)"));
        assert!(output.contains("EUR"));
    }

    #[tokio::test]
    async fn test_price_command_json() {
        let mut command = make_command(PriceGuideQuery::default());
        command.config.format = OutputFormat::Json;

        let output = command
            .execute_with_client(&MockBricklinkClient { should_fail: false }, ItemType::Minifig, "sw0001a")
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["item"]["type"], "MINIFIG");
    }

    #[tokio::test]
    async fn test_price_command_error_keeps_kind() {
        let err = make_command(PriceGuideQuery::default())
            .execute_with_client(&MockBricklinkClient { should_fail: true }, ItemType::Part, "3001")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Price guide lookup failed for PART 3001"));
        assert_eq!(err.downcast_ref::<BricklinkError>().unwrap().kind(), ErrorKind::Decode);
    }
}
