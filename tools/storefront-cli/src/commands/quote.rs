//! One-line cart quotes.

use anyhow::{Context as _, Result};
use serde::Serialize;
use storefront_commerce::cart::{Cart, CartPricing, ShippingPolicy};
use storefront_commerce::money::Money;
use storefront_commerce::resolver::resolve;

use super::QuoteArgs;
use crate::context::Context;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Quote {
    cart: Cart,
    pricing: CartPricing,
    /// Extra spend needed before shipping is free, zero once it is.
    remaining_for_free_shipping: Money,
}

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let settings = &ctx.config.storefront;
    let product = ctx.load_product(&args.product)?;
    let selection = args.selection.to_selection(settings.default_price_type)?;
    let resolution = resolve(&product, &selection);

    let mut cart = Cart::new(settings.currency);
    cart.add_resolution(&resolution, args.quantity)
        .with_context(|| format!("Cannot add {} to the cart", resolution.product_name))?;

    let quote = build_quote(cart, &settings.shipping_policy()?)?;

    if ctx.output.is_json() {
        ctx.output.json(&quote);
        return Ok(());
    }

    ctx.output.header("Quote");
    for item in &quote.cart.items {
        ctx.output.kv(
            &item.display_name(),
            &format!(
                "{} x {} = {}",
                item.quantity,
                item.unit_price.display(),
                item.total_price.display()
            ),
        );
    }

    let pricing = &quote.pricing;
    ctx.output.kv("subtotal", &pricing.subtotal.display());
    if pricing.has_free_shipping() {
        ctx.output.kv("shipping", "free");
    } else {
        ctx.output.kv("shipping", &pricing.shipping_total.display());
    }
    ctx.output.kv("total", &pricing.grand_total.display());

    if quote.remaining_for_free_shipping.is_positive() {
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            quote.remaining_for_free_shipping.display()
        ));
    }

    Ok(())
}

fn build_quote(cart: Cart, shipping: &ShippingPolicy) -> Result<Quote> {
    let pricing = cart.calculate_pricing(shipping)?;
    let remaining_for_free_shipping = if pricing.has_free_shipping() {
        Money::zero(pricing.subtotal.currency)
    } else {
        shipping.remaining_for_free_shipping(&pricing.subtotal)
    };

    Ok(Quote {
        cart,
        pricing,
        remaining_for_free_shipping,
    })
}
