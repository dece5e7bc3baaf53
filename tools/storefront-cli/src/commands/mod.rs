//! CLI command implementations.

pub mod config;
pub mod quote;
pub mod resolve;
pub mod variants;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use storefront_commerce::ids::{ColorId, RegionId, StorageId};
use storefront_commerce::resolver::{PriceType, Selection};

/// Variant selection shared by `resolve` and `quote`.
#[derive(Args, Debug, Default)]
pub struct SelectionArgs {
    /// Region or network id.
    #[arg(short, long)]
    pub region: Option<String>,

    /// Color id.
    #[arg(long)]
    pub color: Option<String>,

    /// Storage id.
    #[arg(short, long)]
    pub storage: Option<String>,

    /// Price mode: offer or regular (default from config).
    #[arg(short, long)]
    pub price_type: Option<String>,
}

impl SelectionArgs {
    /// Build a selection, starting from the configured price mode.
    pub fn to_selection(&self, default_price_type: PriceType) -> Result<Selection> {
        let price_type = match self.price_type.as_deref() {
            Some(raw) => match PriceType::parse(raw) {
                Some(price_type) => price_type,
                None => bail!("Unknown price type '{}', expected offer or regular", raw),
            },
            None => default_price_type,
        };

        let mut selection = Selection::new().with_price_type(price_type);
        if let Some(region) = &self.region {
            selection = selection.select_region(RegionId::new(region.as_str()));
        }
        if let Some(color) = &self.color {
            selection = selection.select_color(ColorId::new(color.as_str()));
        }
        if let Some(storage) = &self.storage {
            selection = selection.select_storage(StorageId::new(storage.as_str()));
        }
        Ok(selection)
    }
}

/// Arguments for the variants command.
#[derive(Args)]
pub struct VariantsArgs {
    /// Product JSON file, or a slug in the products directory.
    pub product: String,
}

/// Arguments for the resolve command.
#[derive(Args)]
pub struct ResolveArgs {
    /// Product JSON file, or a slug in the products directory.
    pub product: String,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Product JSON file, or a slug in the products directory.
    pub product: String,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Number of units.
    #[arg(short, long, default_value = "1")]
    pub quantity: i64,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Overwrite an existing config without asking.
        #[arg(short, long)]
        force: bool,

        /// Write JSON instead of TOML.
        #[arg(long)]
        json: bool,
    },
}
