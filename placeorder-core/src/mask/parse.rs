//! Keystroke validation and cleaning of display text back to a bare number.

use super::format::split_number;
use super::{MaskOptions, MaskRejection};

/// `^(-)?prefix`; an empty prefix always matches.
pub(crate) fn has_prefix(text: &str, prefix: &str) -> bool {
    text.strip_prefix('-').unwrap_or(text).starts_with(prefix)
}

pub(crate) fn has_suffix(text: &str, suffix: &str) -> bool {
    text.ends_with(suffix)
}

/// Drop the prefix, keeping a sign that precedes it.
pub(crate) fn strip_prefix<'a>(text: &'a str, prefix: &str) -> std::borrow::Cow<'a, str> {
    if prefix.is_empty() {
        return text.into();
    }
    if let Some(rest) = text.strip_prefix('-').and_then(|t| t.strip_prefix(prefix)) {
        return format!("-{rest}").into();
    }
    text.strip_prefix(prefix).unwrap_or(text).into()
}

pub(crate) fn strip_suffix<'a>(text: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return text;
    }
    text.strip_suffix(suffix).unwrap_or(text)
}

/// Fold every `-` into a single leading sign: an even count cancels out.
pub fn correct_sign(text: &str) -> String {
    let minus_count = text.matches('-').count();
    let unsigned: String = text.chars().filter(|&c| c != '-').collect();
    if minus_count % 2 == 1 {
        format!("-{unsigned}")
    } else {
        unsigned
    }
}

/// Keep the leading `-?\d*(\.\d{0,scale})?` match.
pub fn trim_decimals(text: &str, decimal_scale: Option<u32>) -> &str {
    &text[..split_number(text, decimal_scale).len()]
}

/// Strip prefix and suffix, normalise the sign and cut extra decimals.
pub fn clear_value(text: &str, options: &MaskOptions) -> String {
    let unprefixed = strip_prefix(text, &options.prefix);
    let bare = strip_suffix(&unprefixed, &options.suffix);
    let signed = correct_sign(bare);
    trim_decimals(&signed, options.decimal_scale).to_string()
}

/// Only digits, any number of `-` and a single `.` may remain once the
/// wrapper is removed.
pub(crate) fn has_only_valid_symbols(text: &str, options: &MaskOptions) -> bool {
    let unprefixed = strip_prefix(text, &options.prefix);
    let bare = strip_suffix(&unprefixed, &options.suffix);
    let mut dots = 0;
    bare.chars().all(|c| match c {
        '-' | '0'..='9' => true,
        '.' => {
            dots += 1;
            dots == 1
        }
        _ => false,
    })
}

/// `^(-)?(\d*)?(\.\d*)?$`
pub(crate) fn is_clear_number(clear: &str) -> bool {
    let body = clear.strip_prefix('-').unwrap_or(clear);
    let (whole, fraction) = match body.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (body, ""),
    };
    whole.chars().all(|c| c.is_ascii_digit()) && fraction.chars().all(|c| c.is_ascii_digit())
}

/// Parse cleaned text as a float. Text without a single digit (`""`, `-`,
/// `.`) has no value.
pub fn parse_number(clear: &str) -> Option<f64> {
    let parts = split_number(clear, None);
    let fraction = parts.fraction();
    if parts.whole.is_empty() && fraction.is_empty() {
        return None;
    }
    let whole = if parts.whole.is_empty() { "0" } else { parts.whole };
    let fraction = if fraction.is_empty() { "0" } else { fraction };
    format!("{}{}.{}", parts.sign, whole, fraction).parse().ok()
}

/// `^-?\s*$`: empty, or a single sign followed by trailing whitespace.
pub(crate) fn is_blank(text: &str) -> bool {
    text.strip_prefix('-').unwrap_or(text).trim_end().is_empty()
}

/// Decide whether `candidate` may replace `current` in a field and return
/// its cleaned numeric text.
///
/// `disallow_negative` is set when the field's lower bound is at or above
/// zero. The prefix/suffix wrapper is only checked once the field holds
/// more than a bare sign.
pub fn parse_keystroke(
    current: &str,
    candidate: &str,
    options: &MaskOptions,
    disallow_negative: bool,
) -> Result<String, MaskRejection> {
    let clear = clear_value(candidate, options);
    if disallow_negative && clear.contains('-') {
        return Err(MaskRejection::NegativeNotAllowed);
    }
    if !has_only_valid_symbols(candidate, options) {
        return Err(MaskRejection::InvalidSymbols);
    }
    if !is_blank(current)
        && has_prefix(candidate, &options.prefix) != has_suffix(candidate, &options.suffix)
    {
        return Err(MaskRejection::BrokenWrapper);
    }
    if !is_clear_number(&clear) {
        return Err(MaskRejection::Malformed);
    }
    Ok(clear)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapped() -> MaskOptions {
        MaskOptions::default().with_prefix("$").with_suffix(" USDT")
    }

    #[test]
    fn prefix_strip_keeps_sign() {
        assert_eq!(strip_prefix("-$12", "$"), "-12");
        assert_eq!(strip_prefix("$12", "$"), "12");
        assert_eq!(strip_prefix("12", "$"), "12");
    }

    #[test]
    fn double_negation_cancels() {
        assert_eq!(correct_sign("--5"), "5");
        assert_eq!(correct_sign("5-"), "-5");
        assert_eq!(correct_sign("-5-5-"), "-55");
    }

    #[test]
    fn clear_value_unwraps() {
        assert_eq!(clear_value("-$12.345 USDT", &wrapped().with_decimal_scale(2)), "-12.34");
        assert_eq!(clear_value("$ USDT", &wrapped()), "");
    }

    #[test]
    fn symbols() {
        let options = MaskOptions::default();
        assert!(has_only_valid_symbols("-12.5", &options));
        assert!(has_only_valid_symbols("--12", &options));
        assert!(!has_only_valid_symbols("1.2.3", &options));
        assert!(!has_only_valid_symbols("12a", &options));
        assert!(!has_only_valid_symbols("1 2", &options));
        assert!(has_only_valid_symbols("$12 USDT", &wrapped()));
    }

    #[test]
    fn clear_number_shape() {
        assert!(is_clear_number(""));
        assert!(is_clear_number("-"));
        assert!(is_clear_number("-.5"));
        assert!(is_clear_number("5."));
        assert!(!is_clear_number("1-2"));
    }

    #[test]
    fn numbers_parse_like_partial_input() {
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-.5"), Some(-0.5));
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn negative_rejected_when_disallowed() {
        let options = MaskOptions::default();
        assert_eq!(
            parse_keystroke("5", "-5", &options, true),
            Err(MaskRejection::NegativeNotAllowed)
        );
        assert_eq!(parse_keystroke("5", "--5", &options, true), Ok("5".into()));
    }

    #[test]
    fn broken_wrapper_rejected() {
        assert_eq!(
            parse_keystroke("$12 USDT", "$12 USD", &wrapped(), false),
            Err(MaskRejection::InvalidSymbols)
        );
        assert_eq!(
            parse_keystroke("$12 USDT", "12 USDT", &wrapped(), false),
            Err(MaskRejection::BrokenWrapper)
        );
    }

    #[test]
    fn wrapper_not_checked_on_blank_field() {
        assert_eq!(parse_keystroke("", "7", &wrapped(), false), Ok("7".into()));
        assert_eq!(parse_keystroke("-", "-7", &wrapped(), false), Ok("-7".into()));
    }

    #[test]
    fn blank_means_at_most_one_sign() {
        assert!(is_blank(""));
        assert!(is_blank("-"));
        assert!(is_blank("- "));
        assert!(!is_blank("--"));
        assert!(!is_blank(" -"));
        assert!(!is_blank("-5"));

        let percent = MaskOptions::default().with_suffix("%");
        assert_eq!(parse_keystroke("-", "-7", &percent, false), Ok("-7".into()));
        assert_eq!(
            parse_keystroke("--", "--7", &percent, false),
            Err(MaskRejection::BrokenWrapper)
        );
    }
}
