//! Variant tree inspection.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::catalog::{
    price_range, primary_image, total_stock, Color, PriceRange, Region, Storage,
};
use storefront_commerce::money::Currency;
use storefront_commerce::resolver::normalize;

use super::VariantsArgs;
use crate::context::Context;
use crate::output::{format_money, format_quantity, Output};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VariantsReport<'a> {
    product_id: &'a str,
    name: &'a str,
    product_type: &'static str,
    dimension: &'static str,
    price_range: Option<PriceRange>,
    total_stock: f64,
    primary_image: Option<String>,
    regions: &'a [Region],
}

/// Run the variants command.
pub fn run(args: VariantsArgs, ctx: &Context) -> Result<()> {
    let product = ctx.load_product(&args.product)?;
    let regions = normalize(&product);
    let kind = product.kind();

    let report = VariantsReport {
        product_id: product.id.as_str(),
        name: &product.name,
        product_type: kind.as_str(),
        dimension: kind.dimension_label(),
        price_range: price_range(&product),
        total_stock: total_stock(&product),
        primary_image: primary_image(&product),
        regions: &regions,
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    let currency = ctx.config.storefront.currency;

    ctx.output.header(&format!("{} ({})", report.name, report.product_id));
    ctx.output.kv("type", report.product_type);
    if let Some(range) = report.price_range {
        ctx.output.kv("price", &format_range(&range, currency));
    }
    ctx.output.kv("stock", &format_quantity(report.total_stock));
    if let Some(image) = &report.primary_image {
        ctx.output.kv("image", image);
    }

    if regions.is_empty() {
        ctx.output.info("No variants: the product is sold as a single item.");
        return Ok(());
    }

    for region in &regions {
        print_region(&ctx.output, report.dimension, region, currency);
    }

    Ok(())
}

fn print_region(output: &Output, dimension: &str, region: &Region, currency: Currency) {
    output.list_item(0, &format!("{} {} [{}]", dimension, region.name, region.id));

    for color in &region.colors {
        print_color(output, region, color, currency);
    }
}

fn print_color(output: &Output, region: &Region, color: &Color, currency: Currency) {
    output.list_item(1, &format!("{} [{}]", color.name, color.id));

    if color.lacks_storage() {
        let price = color
            .discount_price
            .filter(|p| *p > 0.0)
            .or(color.regular_price)
            .unwrap_or(0.0);
        output.list_item(
            2,
            &format!(
                "no storage, {} (stock {})",
                format_money(price, currency),
                format_quantity(color.stock_quantity.unwrap_or(0.0))
            ),
        );
        return;
    }

    let storages = color
        .own_storages()
        .unwrap_or(region.default_storages.as_slice());
    for storage in storages {
        output.list_item(2, &storage_line(storage, currency));
    }
}

fn storage_line(storage: &Storage, currency: Currency) -> String {
    let size = if storage.size.is_empty() {
        "(unnamed)"
    } else {
        storage.size.as_str()
    };
    let price = storage.price.map(|p| p.listed_price()).unwrap_or(0.0);
    let default_marker = if storage.is_default { ", default" } else { "" };

    format!(
        "{} [{}] {} (stock {}{})",
        size,
        storage.id,
        format_money(price, currency),
        format_quantity(storage.resolved_stock()),
        default_marker
    )
}

fn format_range(range: &PriceRange, currency: Currency) -> String {
    let min = format_money(range.min, currency);
    if range.is_single() {
        min
    } else {
        format!("{} - {}", min, format_money(range.max, currency))
    }
}
