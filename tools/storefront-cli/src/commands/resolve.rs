//! Variant selection resolution.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::ids::{ColorId, RegionId, StorageId};
use storefront_commerce::money::Currency;
use storefront_commerce::resolver::{resolve, select, Resolution, Selection};

use super::ResolveArgs;
use crate::context::Context;
use crate::output::{format_money, price_label, stock_badge};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveReport<'a> {
    /// Ids the fallbacks settled on.
    selection: Selection,
    label: Option<String>,
    care_plus_price: Option<f64>,
    #[serde(flatten)]
    resolution: &'a Resolution,
}

/// Run the resolve command.
pub fn run(args: ResolveArgs, ctx: &Context) -> Result<()> {
    let settings = &ctx.config.storefront;
    let product = ctx.load_product(&args.product)?;
    let selection = args.selection.to_selection(settings.default_price_type)?;

    let resolution = resolve(&product, &selection);
    let settled = settle(&selection, &resolution);
    let care_plus = product
        .is_care
        .then(|| resolution.care_plus_price(settings.care_plus_rate));
    let label = resolution.cart_options().ok().and_then(|o| o.label());

    if ctx.output.is_json() {
        ctx.output.json(&ResolveReport {
            selection: settled,
            label,
            care_plus_price: care_plus,
            resolution: &resolution,
        });
        return Ok(());
    }

    let currency = settings.currency;
    ctx.output.header(&resolution.product_name);

    if let Some(region) = &resolution.region {
        ctx.output.kv(
            &resolution.dimension_label().to_lowercase(),
            &format!("{} [{}]", region.name, region.id),
        );
    }
    if let Some(color) = &resolution.color {
        ctx.output.kv("color", &format!("{} [{}]", color.name, color.id));
    }
    if let Some(storage) = &resolution.storage {
        ctx.output.kv("storage", &format!("{} [{}]", storage.size, storage.id));
    }

    ctx.output.kv("price", &resolution_price(&resolution, currency));
    ctx.output.kv("mode", resolution.price_type.as_str());
    ctx.output.kv(
        "unit price",
        &format_money(resolution.unit_price, currency),
    );
    ctx.output.kv("stock", &stock_badge(resolution.price.stock));
    if let Some(care_plus) = care_plus {
        ctx.output.kv("care+", &format_money(care_plus, currency));
    }
    if let Some(image) = &resolution.color_image {
        ctx.output.kv("image", image);
    }

    report_fallbacks(ctx, &selection, &settled);
    Ok(())
}

/// Selection with every fallback pinned to the id it resolved to.
fn settle(selection: &Selection, resolution: &Resolution) -> Selection {
    selection.settled(&select(&resolution.regions, selection))
}

fn report_fallbacks(ctx: &Context, requested: &Selection, settled: &Selection) {
    let pairs = [
        (
            "region",
            requested.region_id.as_ref().map(RegionId::as_str),
            settled.region_id.as_ref().map(RegionId::as_str),
        ),
        (
            "color",
            requested.color_id.as_ref().map(ColorId::as_str),
            settled.color_id.as_ref().map(ColorId::as_str),
        ),
        (
            "storage",
            requested.storage_id.as_ref().map(StorageId::as_str),
            settled.storage_id.as_ref().map(StorageId::as_str),
        ),
    ];

    for (dimension, wanted, got) in pairs {
        if let Some(wanted) = wanted {
            if Some(wanted) != got {
                ctx.output.warn(&format!(
                    "{} '{}' not found, fell back to {}",
                    dimension,
                    wanted,
                    got.unwrap_or("none")
                ));
            }
        }
    }
}

fn resolution_price(resolution: &Resolution, currency: Currency) -> String {
    let price = &resolution.price;
    price_label(
        price.regular_price,
        price.discount_price,
        price.discount_percent,
        currency,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::catalog::Product;

    fn phone() -> Product {
        Product::from_json(
            r#"{
                "id": "p1",
                "name": "Phone",
                "productType": "region",
                "regions": [{
                    "id": "r1",
                    "name": "EU",
                    "colors": [{"id": "c1", "colorName": "Black"}],
                    "defaultStorages": [{"id": "s1", "size": "128GB", "price": {"regularPrice": 1000, "stockQuantity": 2}}]
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_settle_pins_fallbacks() {
        let selection = Selection::new().select_color(ColorId::new("missing"));
        let resolution = resolve(&phone(), &selection);

        let settled = settle(&selection, &resolution);
        assert_eq!(settled.region_id, Some(RegionId::new("r1")));
        assert_eq!(settled.color_id, Some(ColorId::new("c1")));
        assert_eq!(settled.storage_id.as_ref().map(|s| s.as_str()), Some("s1"));
        assert_eq!(settled.price_type, selection.price_type);
    }

    #[test]
    fn test_report_flattens_resolution() {
        let resolution = resolve(&phone(), &Selection::new());
        let report = ResolveReport {
            selection: settle(&Selection::new(), &resolution),
            label: resolution.cart_options().ok().and_then(|o| o.label()),
            care_plus_price: None,
            resolution: &resolution,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["label"], "EU / Black / 128GB");
        assert_eq!(value["unitPrice"], 1000.0);
        assert_eq!(value["selection"]["regionId"], "r1");
    }
}
