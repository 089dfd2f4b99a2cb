//! Field validators shared by request DTOs.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

/// UN/LOCODE: two-letter country code followed by three letters or digits 2-9
pub static UNLOCODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[A-Z2-9]{3}$").expect("UN/LOCODE pattern"));

/// ISO 6346 style container code: four capital letters and seven digits
pub static CONTAINER_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{4}[0-9]{7}$").expect("container code pattern"));

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_percent(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO && *value <= Decimal::ONE_HUNDRED {
        Ok(())
    } else {
        let mut err = ValidationError::new("range");
        err.message = Some("must be between 0 and 100".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("NLRTM", true)]
    #[case("USNYC", true)]
    #[case("DEHA2", true)]
    #[case("nlrtm", false)]
    #[case("NLRT", false)]
    #[case("NLRT1", false)]
    fn unlocode_pattern(#[case] code: &str, #[case] valid: bool) {
        assert_eq!(UNLOCODE_REGEX.is_match(code), valid);
    }

    #[rstest]
    #[case("MSCU1234567", true)]
    #[case("MSC1234567", false)]
    #[case("mscu1234567", false)]
    #[case("MSCU123456A", false)]
    fn container_code_pattern(#[case] code: &str, #[case] valid: bool) {
        assert_eq!(CONTAINER_CODE_REGEX.is_match(code), valid);
    }

    #[test]
    fn percent_bounds_are_inclusive() {
        assert!(validate_percent(&dec!(0)).is_ok());
        assert!(validate_percent(&dec!(100)).is_ok());
        assert!(validate_percent(&dec!(100.01)).is_err());
        assert!(validate_percent(&dec!(-1)).is_err());
    }

    #[test]
    fn blank_strings_are_rejected() {
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("Rotterdam").is_ok());
    }
}
