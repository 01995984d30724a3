//! Cart arithmetic and cart-versus-catalog comparison.
//!
//! Money is compared with [`MONEY_TOLERANCE`]; everything else exactly.
//! Product names are compared as sorted lists since the cart may reorder rows.

use crate::result::{VitrinaError, VitrinaResult};
use serde::{Deserialize, Serialize};

/// Largest accepted difference between two money amounts
pub const MONEY_TOLERANCE: f64 = 0.01;

/// A product as added from its detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub quantity: u32,
    /// Unit price read from the detail page
    pub price: f64,
}

impl ProductRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }

    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Everything the cart table shows, in row order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub names: Vec<String>,
    pub quantities: Vec<u32>,
    pub prices: Vec<f64>,
    pub line_totals: Vec<f64>,
    pub total: f64,
}

/// Per-row deviation of a displayed line total
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineTotalDifference {
    pub index: usize,
    pub actual: f64,
    pub expected: f64,
    pub diff: f64,
}

#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= MONEY_TOLERANCE
}

/// Parse a displayed amount, dropping everything except digits and `.`
pub fn parse_money(text: &str) -> VitrinaResult<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().map_err(|_| {
        VitrinaError::invalid_argument(format!("cannot read an amount from {text:?}"))
    })
}

/// Σ price × quantity
#[must_use]
pub fn expected_subtotal(products: &[ProductRecord]) -> f64 {
    products.iter().map(ProductRecord::line_total).sum()
}

/// Pair displayed line totals with products by row; extra rows on either
/// side are ignored
#[must_use]
pub fn line_total_differences(
    line_totals: &[f64],
    products: &[ProductRecord],
) -> Vec<LineTotalDifference> {
    line_totals
        .iter()
        .zip(products)
        .enumerate()
        .map(|(index, (&actual, product))| {
            let expected = product.line_total();
            LineTotalDifference {
                index,
                actual,
                expected,
                diff: (actual - expected).abs(),
            }
        })
        .collect()
}

/// Sum of absolute line-total deviations
#[must_use]
pub fn line_totals_error(line_totals: &[f64], products: &[ProductRecord]) -> f64 {
    line_total_differences(line_totals, products)
        .iter()
        .map(|d| d.diff)
        .sum()
}

/// Compare a cart snapshot with the products that were added.
///
/// Returns every mismatch found; an empty list means the cart is right.
#[must_use]
pub fn validate_cart(snapshot: &CartSnapshot, products: &[ProductRecord]) -> Vec<String> {
    let mut errors = Vec::new();

    let mut actual_names = snapshot.names.clone();
    actual_names.sort();
    let mut expected_names: Vec<String> = products.iter().map(|p| p.name.clone()).collect();
    expected_names.sort();
    if actual_names != expected_names {
        errors.push(format!(
            "Cart names: expected {expected_names:?}, got {actual_names:?}"
        ));
    }

    let expected_quantities: Vec<u32> = products.iter().map(|p| p.quantity).collect();
    if snapshot.quantities != expected_quantities {
        errors.push(format!(
            "Cart quantities: expected {expected_quantities:?}, got {:?}",
            snapshot.quantities
        ));
    }

    let prices_match = snapshot.prices.len() == products.len()
        && snapshot
            .prices
            .iter()
            .zip(products)
            .all(|(&actual, p)| approx_eq(actual, p.price));
    if !prices_match {
        let expected: Vec<f64> = products.iter().map(|p| p.price).collect();
        errors.push(format!(
            "Cart prices: expected {expected:?}, got {:?}",
            snapshot.prices
        ));
    }

    if snapshot.line_totals.len() != products.len() {
        errors.push(format!(
            "Cart line totals: expected {} rows, got {}",
            products.len(),
            snapshot.line_totals.len()
        ));
    }
    for d in line_total_differences(&snapshot.line_totals, products) {
        if d.diff > MONEY_TOLERANCE {
            errors.push(format!(
                "Line {}: expected {:.2}, got {:.2}",
                d.index + 1,
                d.expected,
                d.actual
            ));
        }
    }

    let expected_total = expected_subtotal(products);
    if !approx_eq(snapshot.total, expected_total) {
        errors.push(format!(
            "Cart total: expected {expected_total:.2}, got {:.2}",
            snapshot.total
        ));
    }

    errors
}
