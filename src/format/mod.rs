//! Output formatting for API results (table, JSON).

use crate::bricklink::{PartOutValue, PriceGuide};
use crate::config::OutputFormat;

/// Formats results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a part-out valuation.
    pub fn format_part_out(&self, item_no: &str, value: &PartOutValue) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string()),
            OutputFormat::Table => {
                let mut lines = vec![
                    format!("Item:          {}", item_no),
                    format!("6-month avg:   ${}", value.average_six_month_sales_value.round_dp(2)),
                    format!("Current value: ${}", value.current_sales_value.round_dp(2)),
                    format!("Items:         {}", value.included_items_count),
                    format!("Lots:          {}", value.included_lots_count),
                ];
                if value.is_empty() {
                    lines.push("(no part-out data; check the item number and type)".to_string());
                }
                lines.join("\n")
            }
        }
    }

    /// Formats a price guide, including up to ten detail rows.
    pub fn format_price_guide(&self, guide: &PriceGuide) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(guide).unwrap_or_else(|_| "{}".to_string()),
            OutputFormat::Table => {
                let mut lines = vec![
                    format!("Item:      {} {} ({})", guide.item.item_type, guide.item.no, guide.new_or_used),
                    format!(
                        "Price:     min {} / avg {} / max {} {}",
                        guide.min_price.round_dp(4),
                        guide.avg_price.round_dp(4),
                        guide.max_price.round_dp(4),
                        guide.currency_code
                    ),
                    format!("Qty avg:   {}", guide.qty_avg_price.round_dp(4)),
                    format!("Lots:      {} ({} units)", guide.unit_quantity, guide.total_quantity),
                ];

                if !guide.price_detail.is_empty() {
                    lines.push(String::new());
                    lines.push(format!("{:>8}  {:>12}", "Qty", "Unit price"));
                    lines.push(format!("{:->8}  {:->12}", "", ""));
                    for detail in guide.price_detail.iter().take(10) {
                        lines.push(format!("{:>8}  {:>12}", detail.quantity, detail.unit_price.round_dp(4)));
                    }
                    if guide.price_detail.len() > 10 {
                        lines.push(format!("... {} more", guide.price_detail.len() - 10));
                    }
                }

                lines.join("\n")
            }
        }
    }
}
