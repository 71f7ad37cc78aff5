//! Price arithmetic using decimal math.
//!
//! Catalog prices are stored as `rust_decimal::Decimal` to avoid the
//! rounding surprises binary floats introduce into money math. Discounts
//! are percentages in the `0..=100` range.

use rust_decimal::Decimal;

/// Compute the effective (discounted) price of an item.
///
/// `effective = price * (1 - discount/100)` when a discount is present,
/// otherwise the nominal price is returned unchanged. A discount of zero
/// is treated the same as no discount.
///
/// # Example
///
/// ```rust
/// use rust_decimal::Decimal;
/// use store2u_core::effective_price;
///
/// let price = Decimal::new(5000, 2); // 50.00
/// let discount = Decimal::new(20, 0); // 20%
/// assert_eq!(effective_price(price, Some(discount)), Decimal::new(4000, 2));
/// assert_eq!(effective_price(price, None), price);
/// ```
#[must_use]
pub fn effective_price(price: Decimal, discount: Option<Decimal>) -> Decimal {
    match discount {
        Some(pct) if pct > Decimal::ZERO => {
            price * (Decimal::ONE - pct / Decimal::ONE_HUNDRED)
        }
        _ => price,
    }
}
