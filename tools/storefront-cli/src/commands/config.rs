//! Configuration management commands.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force, json } => init_config(force, json, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.info("No config file found, using defaults."),
    }

    let storefront = &ctx.config.storefront;
    ctx.output.info("");
    ctx.output.info("[storefront]");
    ctx.output.kv("currency", storefront.currency.code());
    ctx.output.kv("cache_ttl_ms", &storefront.cache_ttl_ms.to_string());
    ctx.output.kv("care_plus_rate", &storefront.care_plus_rate.to_string());
    ctx.output
        .kv("default_price_type", storefront.default_price_type.as_str());

    let policy = storefront.shipping_policy()?;
    ctx.output.info("");
    ctx.output.info("[storefront.shipping]");
    ctx.output.kv(
        "free_shipping_threshold",
        &policy.free_shipping_threshold.display(),
    );
    ctx.output.kv("flat_fee", &policy.flat_fee.display());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output
        .kv("products_dir", &ctx.products_dir().display().to_string());

    Ok(())
}

fn init_config(force: bool, json: bool, ctx: &Context) -> Result<()> {
    let name = if json { "storefront.json" } else { "storefront.toml" };
    let config_path = ctx.cwd.join(name);

    if config_path.exists() && !force && !confirm_overwrite(&config_path, ctx)? {
        ctx.output.info("Kept the existing config.");
        return Ok(());
    }

    if json {
        CliConfig::default().save(&config_path)?;
    } else {
        fs::write(&config_path, generate_default_config())
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;
    }

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn confirm_overwrite(path: &Path, ctx: &Context) -> Result<bool> {
    if ctx.output.is_json() {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}
