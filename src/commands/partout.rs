//! Part-out valuation command implementation.

use crate::bricklink::{BricklinkApi, BricklinkClient, PartOutQuery};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Looks up the part-out value of one or more items.
pub struct PartOutCommand {
    config: Config,
    query: PartOutQuery,
}

impl PartOutCommand {
    /// Creates a new part-out command.
    pub fn new(config: Config, query: PartOutQuery) -> Self {
        Self { config, query }
    }

    /// Fetches the part-out value and returns formatted output.
    pub async fn execute(&self, item_no: &str) -> Result<String> {
        let client =
            BricklinkClient::new(self.config.clone()).context("Failed to create BrickLink client")?;

        self.execute_with_client(&client, item_no).await
    }

    /// Fetches the part-out value with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl BricklinkApi, item_no: &str) -> Result<String> {
        info!("Part-out value for: {}", item_no);

        let value = client
            .get_part_out_value(item_no, &self.query)
            .await
            .with_context(|| format!("Part-out lookup failed for {}", item_no))?;

        if value.is_empty() {
            warn!("Part-out value for {} is all zeros", item_no);
        }

        Ok(Formatter::new(self.config.format).format_part_out(item_no, &value))
    }

    /// Fetches several items, one request each.
    pub async fn execute_batch(&self, item_nos: &[String]) -> Result<String> {
        let client =
            BricklinkClient::new(self.config.clone()).context("Failed to create BrickLink client")?;

        self.execute_batch_with_client(&client, item_nos).await
    }

    /// Fetches several items with a provided client. Failures are reported inline.
    pub async fn execute_batch_with_client(
        &self,
        client: &impl BricklinkApi,
        item_nos: &[String],
    ) -> Result<String> {
        let mut sections = Vec::new();

        for item_no in item_nos {
            match self.execute_with_client(client, item_no).await {
                Ok(output) => sections.push(output),
                Err(e) => sections.push(format!("{}: {:#}", item_no, e)),
            }
        }

        Ok(sections.join("\n\n"))
    }
}
