//! Catalog text rendering
//!
//! Converts product records into the plain-text block the assistant receives
//! as the result of the product list tool. Rendering branches on product
//! sub-category: computers (processor present) and printers (printing
//! technology present). Products matching neither get the common fields only.

use super::entities::Product;
use crate::core::error::DomainError;
use std::fmt::Write;

/// Returned for an empty catalog.
pub const NO_PRODUCTS_MESSAGE: &str = "No products are currently available in the inventory.";

/// Returned when rendering fails for any reason.
pub const FORMAT_ERROR_MESSAGE: &str =
    "Sorry, there was an error formatting the product information.";

const CATALOG_HEADER: &str = "Available Products:";
const NOT_AVAILABLE: &str = "N/A";

/// Largest cent amount an `f64` still holds exactly (2^53).
const MAX_CENTS: f64 = 9_007_199_254_740_992.0;

/// Render a price as `$X,XXX.XX`, or `-$X,XXX.XX` when negative.
///
/// Fails for non-finite values and for amounts too large to render exactly.
pub fn format_price(price: f64) -> Result<String, DomainError> {
    if !price.is_finite() {
        return Err(DomainError::InvalidPrice(price));
    }

    let scaled = (price.abs() * 100.0).round();
    if scaled > MAX_CENTS {
        return Err(DomainError::InvalidPrice(price));
    }
    let cents = scaled as u64;
    let sign = if price < 0.0 && cents > 0 { "-" } else { "" };
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    Ok(format!("{}${}.{:02}", sign, grouped, fraction))
}

/// Render a single product block (no header, no trailing blank line).
///
/// A price that cannot be rendered shows as `N/A`; the rest of the block is kept.
pub fn format_product(product: &Product) -> Result<String, DomainError> {
    let mut out = String::new();

    writeln!(out, "• {}", product.name)?;
    writeln!(
        out,
        "  Brand: {} | Model: {}",
        product.brand,
        product.model.as_deref().unwrap_or(NOT_AVAILABLE)
    )?;
    writeln!(out, "  Description: {}", product.description)?;
    writeln!(out, "  Category: {}", product.category)?;
    let price = format_price(product.price).unwrap_or_else(|_| NOT_AVAILABLE.to_string());
    writeln!(out, "  Price: {}", price)?;
    writeln!(out, "  Stock: {} units", product.stock)?;

    if let Some(processor) = &product.processor {
        writeln!(out, "  Processor: {}", processor)?;
        writeln!(out, "  RAM: {}", or_na(&product.ram))?;
        writeln!(
            out,
            "  Storage: {} {}",
            or_na(&product.storage_capacity),
            or_na(&product.storage_type)
        )?;
        writeln!(out, "  Graphics: {}", or_na(&product.graphics_card))?;
        writeln!(out, "  OS: {}", or_na(&product.operating_system))?;
    } else if let Some(technology) = &product.printing_technology {
        writeln!(out, "  Printing Technology: {}", technology)?;
        let connectivity = product
            .connectivity_options
            .as_ref()
            .filter(|options| !options.is_empty())
            .map(|options| options.join(", "))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        writeln!(out, "  Connectivity: {}", connectivity)?;
    }

    Ok(out)
}

/// Render a full catalog, surfacing failures to the caller.
pub fn try_format_catalog(products: &[Product]) -> Result<String, DomainError> {
    if products.is_empty() {
        return Ok(NO_PRODUCTS_MESSAGE.to_string());
    }

    let mut out = String::new();
    writeln!(out, "{}", CATALOG_HEADER)?;
    writeln!(out)?;
    for product in products {
        out.push_str(&format_product(product)?);
        writeln!(out)?;
    }
    Ok(out)
}

/// Render a full catalog. Never fails: errors collapse to [`FORMAT_ERROR_MESSAGE`].
pub fn format_catalog(products: &[Product]) -> String {
    try_format_catalog(products).unwrap_or_else(|_| FORMAT_ERROR_MESSAGE.to_string())
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}
