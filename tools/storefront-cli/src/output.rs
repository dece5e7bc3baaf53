//! Output formatting for the CLI.

use console::style;
use storefront_commerce::money::{Currency, Money};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item, indented by nesting depth.
    pub fn list_item(&self, depth: usize, item: &str) {
        if self.json {
            return;
        }
        println!("{}{} {}", "  ".repeat(depth + 1), style("•").dim(), item);
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Colored stock label.
pub fn stock_badge(stock: f64) -> String {
    if stock > 0.0 {
        style(format!("in stock ({})", format_quantity(stock))).green().to_string()
    } else {
        style("out of stock").red().to_string()
    }
}

/// Display a decimal catalog amount, or "n/a" when it does not fit in minor units.
pub fn format_money(amount: f64, currency: Currency) -> String {
    Money::from_decimal(amount, currency)
        .map(|money| money.display())
        .unwrap_or_else(|| "n/a".to_string())
}

/// Regular price struck through next to the offer price, when discounted.
pub fn price_label(regular: f64, offer: f64, discount_percent: u32, currency: Currency) -> String {
    let regular_label = format_money(regular, currency);
    if discount_percent > 0 && offer > 0.0 && offer != regular {
        format!(
            "{} {} {}",
            style(format_money(offer, currency)).bold(),
            style(regular_label).dim().strikethrough(),
            style(format!("-{}%", discount_percent)).yellow()
        )
    } else {
        style(regular_label).bold().to_string()
    }
}

/// Format a stock figure without a trailing ".0" for whole numbers.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn test_stock_badge_mentions_state() {
        console::set_colors_enabled(false);
        assert_eq!(stock_badge(3.0), "in stock (3)");
        assert_eq!(stock_badge(0.0), "out of stock");
    }

    #[test]
    fn test_format_money_marks_unrepresentable_amounts() {
        assert_eq!(format_money(12.5, Currency::USD), "$12.50");
        assert_eq!(format_money(f64::NAN, Currency::USD), "n/a");
        assert_eq!(format_money(1e30, Currency::USD), "n/a");
    }

    #[test]
    fn test_price_label_strikes_regular_when_discounted() {
        console::set_colors_enabled(false);
        assert_eq!(price_label(900.0, 900.0, 0, Currency::USD), "$900.00");
        assert_eq!(
            price_label(1000.0, 900.0, 10, Currency::USD),
            "$900.00 $1000.00 -10%"
        );
    }
}
