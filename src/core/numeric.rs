//! Locale-tolerant parsing of extracted numeric text.

/// Parse text like `12,50 €/mese` or `0.153649 €/kWh` into a number.
///
/// The first comma is taken as the decimal separator, then everything but digits and dots
/// is dropped and the longest leading decimal literal is parsed. Anything unparseable
/// is `0.0`, the result is never `NaN`.
#[must_use]
pub fn parse_numeric(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return 0.0;
    };
    let normalized: String = text
        .replacen(',', ".", 1)
        .chars()
        .filter(|char_| char_.is_ascii_digit() || *char_ == '.')
        .collect();
    leading_decimal(&normalized).and_then(|literal| literal.parse().ok()).unwrap_or(0.0)
}

/// Longest prefix of the form `digits[.digits]` holding at least one digit.
fn leading_decimal(text: &str) -> Option<&str> {
    let integer_len = text.bytes().take_while(u8::is_ascii_digit).count();
    let mut end = integer_len;
    let mut fraction_len = 0;
    if text.as_bytes().get(end) == Some(&b'.') {
        fraction_len = text[end + 1..].bytes().take_while(u8::is_ascii_digit).count();
        end += 1 + fraction_len;
    }
    (integer_len + fraction_len != 0).then(|| &text[..end])
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_comma_decimal_with_currency() {
        assert_abs_diff_eq!(parse_numeric(Some("12,50 €")), 12.5);
    }

    #[test]
    fn test_unit_suffix() {
        assert_abs_diff_eq!(parse_numeric(Some("0,153649 €/kWh")), 0.153_649);
        assert_abs_diff_eq!(parse_numeric(Some("200 kWh")), 200.0);
        assert_abs_diff_eq!(parse_numeric(Some("0.12 €/kWh")), 0.12);
    }

    #[test]
    fn test_empty_and_absent() {
        assert_abs_diff_eq!(parse_numeric(Some("")), 0.0);
        assert_abs_diff_eq!(parse_numeric(None), 0.0);
    }

    #[test]
    fn test_garbage() {
        assert_abs_diff_eq!(parse_numeric(Some("abc")), 0.0);
        assert_abs_diff_eq!(parse_numeric(Some(".")), 0.0);
        assert_abs_diff_eq!(parse_numeric(Some("N/D")), 0.0);
    }

    #[test]
    fn test_only_first_comma_is_decimal() {
        // The second comma is stripped along with the other non-digits.
        assert_abs_diff_eq!(parse_numeric(Some("1,5,7")), 1.57);
    }

    #[test]
    fn test_thousands_dot_stops_at_second_separator() {
        // `1.234,56` becomes `1.234.56`, the second dot ends the literal.
        assert_abs_diff_eq!(parse_numeric(Some("1.234,56 €")), 1.234);
    }

    #[test]
    fn test_leading_and_trailing_dot() {
        assert_abs_diff_eq!(parse_numeric(Some(",5 €")), 0.5);
        assert_abs_diff_eq!(parse_numeric(Some("5, €")), 5.0);
    }

    #[test]
    fn test_sign_is_dropped() {
        assert_abs_diff_eq!(parse_numeric(Some("-3,00 €")), 3.0);
    }

    #[test]
    fn test_never_nan() {
        for text in ["", ".", "..", "€", "1e5", "∞", "NaN", "½"] {
            assert!(parse_numeric(Some(text)).is_finite(), "{text}");
        }
    }
}
