//! Freight pricing rules: discount resolution and final price computation.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::ServiceError;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Largest amount a `decimal(12, 2)` money column holds.
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Rounds half-up (away from zero) to two places and fixes the scale at two.
pub fn money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Applies the default discount of 0 and checks it lies in `[0, 100]`.
pub fn resolve_discount(discount: Option<Decimal>) -> Result<Decimal, ServiceError> {
    let discount = discount.unwrap_or(Decimal::ZERO);
    if discount < Decimal::ZERO || discount > HUNDRED {
        return Err(ServiceError::BadRequest(format!(
            "Discount percent must be between 0 and 100, got {}",
            discount
        )));
    }
    Ok(money(discount))
}

/// Base prices must lie in `(0, MAX_PRICE]`; they are kept at two decimal places.
pub fn normalize_base_price(base_price: Decimal) -> Result<Decimal, ServiceError> {
    if base_price <= Decimal::ZERO {
        return Err(ServiceError::BadRequest(
            "Base price must be greater than 0".to_string(),
        ));
    }
    let base_price = money(base_price);
    if base_price > MAX_PRICE {
        return Err(ServiceError::BadRequest(format!(
            "Base price must not exceed {}",
            MAX_PRICE
        )));
    }
    Ok(base_price)
}

/// `base × (1 − discount/100)`, with the fraction taken at four places and the
/// result at two, both rounded half-up.
pub fn final_price(base_price: Decimal, discount_percent: Decimal) -> Decimal {
    let fraction = (discount_percent / HUNDRED)
        .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
    money(base_price * (Decimal::ONE - fraction))
}
