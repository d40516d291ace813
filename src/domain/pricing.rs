//! Per-bookmark price computation.

use rust_decimal::Decimal;

use super::track::Track;
use super::view::FieldValue;

/// Renders a monetary amount with exactly two decimal places.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Computes the display price of a track for the requesting user.
///
/// With a personal rate the price is `weight × rate` rounded to two
/// decimals, computed per request so it always reflects the requesting
/// user's rate; it is never written back onto the shared track. Without
/// one the declared price is used. Absent inputs yield `Unknown`.
#[must_use]
pub fn bookmark_price(track: &Track, personal_rate: Option<Decimal>) -> FieldValue {
    match personal_rate {
        Some(rate) => match track.weight {
            Some(weight) => FieldValue::known(format_money(weight * rate)),
            None => FieldValue::Unknown,
        },
        None => FieldValue::or_unknown(track.price),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::track::TrackId;

    fn dec(s: &str) -> Decimal {
        let Ok(d) = s.parse() else {
            panic!("invalid decimal literal: {s}");
        };
        d
    }

    fn track(weight: Option<&str>, price: Option<&str>) -> Track {
        Track {
            id: TrackId::new(),
            tracking_number: "RB000000001CN".to_string(),
            weight: weight.map(dec),
            price: price.map(dec),
            place: None,
            owner_phone: None,
            history: vec![],
        }
    }

    #[test]
    fn personal_rate_multiplies_weight() {
        let priced = bookmark_price(&track(Some("2.5"), Some("999")), Some(dec("10.00")));
        assert_eq!(priced, FieldValue::known("25.00"));
    }

    #[test]
    fn personal_rate_result_is_rounded_to_two_decimals() {
        let priced = bookmark_price(&track(Some("1.333"), None), Some(dec("3")));
        assert_eq!(priced, FieldValue::known("4.00"));

        let priced = bookmark_price(&track(Some("0.755"), None), Some(dec("10")));
        assert_eq!(priced, FieldValue::known("7.55"));
    }

    #[test]
    fn personal_rate_without_weight_is_unknown() {
        let priced = bookmark_price(&track(None, Some("999")), Some(dec("10")));
        assert_eq!(priced, FieldValue::Unknown);
    }

    #[test]
    fn no_rate_falls_back_to_declared_price() {
        let priced = bookmark_price(&track(Some("2.5"), Some("1200")), None);
        assert_eq!(priced, FieldValue::known("1200"));
    }

    #[test]
    fn no_rate_and_no_price_is_unknown() {
        let priced = bookmark_price(&track(Some("2.5"), None), None);
        assert_eq!(priced, FieldValue::Unknown);
    }

    #[test]
    fn money_formatting_pads_to_two_decimals() {
        assert_eq!(format_money(dec("25")), "25.00");
        assert_eq!(format_money(dec("25.5")), "25.50");
        assert_eq!(format_money(dec("25.006")), "25.01");
    }
}
