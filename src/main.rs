//! bricklink - BrickLink API lookups from the command line.

use anyhow::Result;
use bricklink_client::bricklink::images::{self, ImageScheme};
use bricklink_client::bricklink::{GuideType, ItemType, NewOrUsed, PartOutItemType, PartOutQuery, PriceGuideQuery};
use bricklink_client::commands::{PartOutCommand, PriceGuideCommand};
use bricklink_client::config::{Config, OutputFormat};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bricklink",
    version,
    about = "BrickLink part-out values, price guides and image URLs",
    long_about = "Queries the BrickLink store API with OAuth 1.0a signed requests. Credentials are read from \
                  the config file or the BRICKLINK_* environment variables."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "BRICKLINK_TIMEOUT")]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ImageKind {
    Part,
    Minifig,
    Set,
}

#[derive(Subcommand)]
enum Commands {
    /// Part-out value of a set, minifig or gear item
    #[command(alias = "po")]
    Partout {
        /// Item number(s), e.g. 1610 or 1610-2
        #[arg(required = true)]
        items: Vec<String>,

        /// Item type: set, minifig, gear
        #[arg(short = 't', long, default_value = "set", value_parser = parse_code::<PartOutItemType>)]
        item_type: PartOutItemType,

        /// Value used parts instead of new
        #[arg(long)]
        used: bool,

        /// Part out minifigs instead of counting them as one lot
        #[arg(long)]
        break_minifigs: bool,

        /// Part out sets contained in the set
        #[arg(long)]
        break_sets: bool,

        /// Include the original box
        #[arg(long)]
        include_box: bool,

        /// Exclude instructions
        #[arg(long)]
        no_instructions: bool,
    },

    /// Price guide of a catalog item
    #[command(alias = "p")]
    Price {
        /// Item number
        item: String,

        /// Item type: part, set, minifig, gear, book, ...
        #[arg(short = 't', long, default_value = "part", value_parser = parse_code::<ItemType>)]
        item_type: ItemType,

        /// Colour id (parts only)
        #[arg(long)]
        color: Option<u32>,

        /// Use completed sales instead of current listings
        #[arg(long)]
        sold: bool,

        /// Used instead of new
        #[arg(long)]
        used: bool,

        /// Currency code, e.g. EUR
        #[arg(long)]
        currency: Option<String>,
    },

    /// Catalog image URL (no request is made)
    Image {
        /// Item number
        item: String,

        #[arg(value_enum, short = 'k', long, default_value = "part")]
        kind: ImageKind,

        /// Colour id (parts only)
        #[arg(long, default_value = "0")]
        color: u32,

        /// http or https
        #[arg(long)]
        scheme: Option<ImageScheme>,
    },
}

/// Strict, case-insensitive parse. The wire decoders are lenient; user input should not be.
fn parse_code<T: FromStr<Err = String>>(s: &str) -> Result<T, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    match cli.command {
        Commands::Partout { items, item_type, used, break_minifigs, break_sets, include_box, no_instructions } => {
            let query = PartOutQuery {
                item_type,
                condition: if used { NewOrUsed::Used } else { NewOrUsed::New },
                break_minifigs,
                break_sets_in_set: break_sets,
                include_instructions: !no_instructions,
                include_box,
                ..PartOutQuery::default()
            };

            let cmd = PartOutCommand::new(config, query);
            let output = if items.len() == 1 {
                cmd.execute(&items[0]).await?
            } else {
                cmd.execute_batch(&items).await?
            };
            println!("{}", output);
        }

        Commands::Price { item, item_type, color, sold, used, currency } => {
            let query = PriceGuideQuery {
                color_id: color,
                guide_type: if sold { GuideType::Sold } else { GuideType::Stock },
                new_or_used: if used { NewOrUsed::Used } else { NewOrUsed::New },
                country_code: None,
                currency_code: currency,
            };

            let cmd = PriceGuideCommand::new(config, query);
            println!("{}", cmd.execute(item_type, &item).await?);
        }

        Commands::Image { item, kind, color, scheme } => {
            let scheme = scheme.unwrap_or(config.image_scheme);
            let url = match kind {
                ImageKind::Part => images::part_image_for_color(&item, color, scheme)?,
                ImageKind::Minifig => images::minifig_image(&item, scheme)?,
                ImageKind::Set => images::set_image(&item, scheme)?,
            };
            println!("{}", url);
        }
    }

    Ok(())
}
