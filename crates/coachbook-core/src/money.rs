//! Monetary helpers.
//!
//! Amounts are carried as [`Decimal`] at full precision. Rounding happens
//! only when a value is rendered for display.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{Error, Result};

/// Currency assumed when a record does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Largest amount a single payment or due amount may carry (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

pub(crate) fn default_currency() -> String { DEFAULT_CURRENCY.to_owned() }

/// Round to `dp` places (half away from zero) and pad to exactly `dp` places.
pub fn format_fixed(value: Decimal, dp: u32) -> String {
  let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
  rounded.rescale(dp);
  rounded.to_string()
}

/// Render an amount with exactly two decimal places, e.g. `"150.01"`.
pub fn format_amount(amount: Decimal) -> String { format_fixed(amount, 2) }

/// Sum `amounts`, saturating at the bounds of [`Decimal`] instead of
/// panicking. Imported records skip input validation, so totals can still
/// be arbitrarily large.
pub fn total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
  amounts.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Reject amounts that are not in `(0, MAX_AMOUNT]`.
pub(crate) fn check_amount(what: &str, amount: Decimal) -> Result<()> {
  if amount <= Decimal::ZERO {
    return Err(Error::Validation(format!("{what} must be positive, got {amount}")));
  }
  if amount > MAX_AMOUNT {
    return Err(Error::Validation(format!("{what} must not exceed {MAX_AMOUNT}, got {amount}")));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::str::FromStr as _;

  use super::*;

  fn dec(s: &str) -> Decimal { Decimal::from_str(s).unwrap() }

  #[test]
  fn pads_whole_numbers() {
    assert_eq!(format_amount(dec("150")), "150.00");
    assert_eq!(format_amount(Decimal::ZERO), "0.00");
  }

  #[test]
  fn rounds_half_away_from_zero() {
    assert_eq!(format_amount(dec("150.005")), "150.01");
    assert_eq!(format_amount(dec("150.004")), "150.00");
    assert_eq!(format_fixed(dec("0.25"), 1), "0.3");
  }

  #[test]
  fn max_amount_is_ten_to_the_fifteenth() {
    assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000_000_i64));
  }

  #[test]
  fn total_saturates_instead_of_overflowing() {
    assert_eq!(total([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
    assert_eq!(total([dec("100.00"), dec("50.005")]), dec("150.005"));
    assert_eq!(total([]), Decimal::ZERO);
  }

  #[test]
  fn amounts_must_be_positive_and_bounded() {
    assert!(check_amount("amount", dec("0.01")).is_ok());
    assert!(check_amount("amount", MAX_AMOUNT).is_ok());
    assert!(matches!(check_amount("amount", Decimal::ZERO), Err(Error::Validation(_))));
    assert!(matches!(
      check_amount("amount", MAX_AMOUNT + Decimal::ONE),
      Err(Error::Validation(_))
    ));
    assert!(matches!(
      check_amount("amount", dec("79228162514264337593543950335")),
      Err(Error::Validation(_))
    ));
  }
}
