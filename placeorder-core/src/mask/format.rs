//! Rendering numbers and cleaned numeric text into display strings.

use super::MaskOptions;

/// Sign, integer digits and decimal part (dot included) of a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NumberParts<'a> {
    pub sign: &'a str,
    pub whole: &'a str,
    pub decimal: &'a str,
}

impl NumberParts<'_> {
    /// Length in bytes of the matched numeric prefix.
    pub fn len(&self) -> usize {
        self.sign.len() + self.whole.len() + self.decimal.len()
    }

    pub fn fraction(&self) -> &str {
        self.decimal.get(1..).unwrap_or("")
    }
}

/// Match `-?\d*(\.\d{0,scale})?` at the start of `text`. Digits past the
/// decimal scale are cut, never rounded.
pub(crate) fn split_number(text: &str, decimal_scale: Option<u32>) -> NumberParts<'_> {
    let sign_len = usize::from(text.starts_with('-'));
    let after_sign = &text[sign_len..];
    let whole_len = leading_digits(after_sign);
    let after_whole = &after_sign[whole_len..];
    let decimal_len = match after_whole.strip_prefix('.') {
        Some(fraction) => {
            let digits = leading_digits(fraction);
            1 + decimal_scale.map_or(digits, |scale| digits.min(scale as usize))
        }
        None => 0,
    };
    NumberParts {
        sign: &text[..sign_len],
        whole: &after_sign[..whole_len],
        decimal: &after_whole[..decimal_len],
    }
}

fn leading_digits(text: &str) -> usize {
    text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len())
}

/// Positional decimal rendering of a float, never in exponent form
/// (`1e-7` becomes `0.0000001`). Non-finite values render empty.
pub fn plain_decimal(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value == 0.0 {
        // -0.0 renders as "0"
        return "0".into();
    }
    format!("{value}")
}

/// Round to 15 significant digits so arithmetic noise does not survive
/// truncation: `3.0 * 0.3` renders as `0.9`, not `0.89`.
fn strip_float_noise(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    format!("{value:.14e}").parse().unwrap_or(value)
}

/// Collapse leading zeros of the integer part (`00` → `0`, `007.5` → `7.5`)
/// and give a bare fraction its integer zero (`.5` → `0.5`).
pub fn collapse_zeros(text: &str) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (whole, tail) = rest.split_at(leading_digits(rest));
    let fraction_has_digits = tail
        .strip_prefix('.')
        .is_some_and(|fraction| fraction.starts_with(|c: char| c.is_ascii_digit()));
    let whole = match whole.trim_start_matches('0') {
        "" if whole.is_empty() && !fraction_has_digits => "",
        "" => "0",
        trimmed => trimmed,
    };
    format!("{sign}{whole}{tail}")
}

/// Format cleaned numeric text: `sign + prefix + whole + decimal + suffix`.
///
/// The decimal part is dropped entirely when the decimal scale is zero.
/// Empty text and a lone `-` pass through untouched so a user can start
/// typing a negative number.
pub fn format_text(text: &str, options: &MaskOptions) -> String {
    if text.is_empty() || text == "-" {
        return text.to_string();
    }
    let collapsed = collapse_zeros(text);
    let parts = split_number(&collapsed, options.decimal_scale);
    let decimal = if options.decimal_scale.map_or(true, |scale| scale > 0) {
        parts.decimal
    } else {
        ""
    };
    format!(
        "{}{}{}{}{}",
        parts.sign, options.prefix, parts.whole, decimal, options.suffix
    )
}

/// Format a committed value. `None` renders as an empty field.
///
/// When truncation to the decimal scale leaves nothing but zeros the sign
/// is dropped, so `-0.5` at scale 0 renders `0`.
pub fn format_value(value: Option<f64>, options: &MaskOptions) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return String::new();
    };
    let plain = plain_decimal(strip_float_noise(value));
    let parts = split_number(&plain, options.decimal_scale);
    let kept_fraction = if options.decimal_scale == Some(0) {
        ""
    } else {
        parts.fraction()
    };
    let is_zero = parts
        .whole
        .chars()
        .chain(kept_fraction.chars())
        .all(|c| c == '0');
    let unsigned = if is_zero {
        plain.trim_start_matches('-')
    } else {
        plain.as_str()
    };
    format_text(unsigned, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(decimal_scale: u32) -> MaskOptions {
        MaskOptions::default().with_decimal_scale(decimal_scale)
    }

    #[test]
    fn split_truncates_to_scale() {
        let parts = split_number("-12.3456", Some(2));
        assert_eq!(parts.sign, "-");
        assert_eq!(parts.whole, "12");
        assert_eq!(parts.decimal, ".34");
        assert_eq!(parts.len(), 6);
    }

    #[test]
    fn split_stops_at_garbage() {
        let parts = split_number("1.2.3", None);
        assert_eq!(parts.whole, "1");
        assert_eq!(parts.decimal, ".2");
    }

    #[test]
    fn plain_decimal_never_uses_exponent() {
        assert_eq!(plain_decimal(1e-7), "0.0000001");
        assert_eq!(plain_decimal(1e21), "1000000000000000000000");
        assert_eq!(plain_decimal(-0.0), "0");
        assert_eq!(plain_decimal(f64::NAN), "");
    }

    #[test]
    fn zeros_collapse() {
        assert_eq!(collapse_zeros("00"), "0");
        assert_eq!(collapse_zeros("007.5"), "7.5");
        assert_eq!(collapse_zeros("05"), "5");
        assert_eq!(collapse_zeros("-05"), "-5");
        assert_eq!(collapse_zeros(".5"), "0.5");
        assert_eq!(collapse_zeros("-.5"), "-0.5");
        assert_eq!(collapse_zeros("0."), "0.");
        assert_eq!(collapse_zeros("."), ".");
        assert_eq!(collapse_zeros("100"), "100");
    }

    #[test]
    fn text_gets_prefix_and_suffix() {
        let options = MaskOptions::default().with_prefix("$").with_suffix(" USDT");
        assert_eq!(format_text("-12.5", &options), "-$12.5 USDT");
        assert_eq!(format_text("-", &options), "-");
        assert_eq!(format_text("", &options), "");
    }

    #[test]
    fn text_truncates_never_rounds() {
        assert_eq!(format_text("1.999", &scale(2)), "1.99");
        assert_eq!(format_text("1.5", &scale(0)), "1");
    }

    #[test]
    fn value_formatting() {
        let options = MaskOptions::default();
        assert_eq!(format_value(Some(7.5), &options), "7.5");
        assert_eq!(format_value(Some(1e-7), &options), "0.0000001");
        assert_eq!(format_value(None, &options), "");
        assert_eq!(format_value(Some(f64::INFINITY), &options), "");
    }

    #[test]
    fn float_noise_does_not_truncate_down() {
        let product = 3.0 * 0.3;
        assert_ne!(product, 0.9);
        assert_eq!(format_value(Some(product), &scale(2)), "0.9");
        assert_eq!(format_value(Some(0.1 + 0.2), &scale(8)), "0.3");
        assert_eq!(format_value(Some(1.999), &scale(2)), "1.99");
    }

    #[test]
    fn negative_fraction_truncated_to_zero_loses_sign() {
        assert_eq!(format_value(Some(-0.5), &scale(0)), "0");
        assert_eq!(format_value(Some(-0.04), &scale(1)), "0.0");
        assert_eq!(format_value(Some(-0.5), &scale(1)), "-0.5");
        assert_eq!(format_value(Some(-1.5), &scale(0)), "-1");
    }
}
