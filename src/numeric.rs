pub fn parse_js_number(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(value) = parse_radix_literal(text) {
        return value;
    }

    let decimal_chars = text
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_chars {
        return None;
    }

    text.parse::<f64>().ok()
}

/// `Some(None)` means the text carried a radix prefix but invalid digits.
fn parse_radix_literal(text: &str) -> Option<Option<f64>> {
    let mut chars = text.chars();
    if chars.next() != Some('0') {
        return None;
    }
    let radix = match chars.next() {
        Some('x' | 'X') => 16,
        Some('o' | 'O') => 8,
        Some('b' | 'B') => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(None);
    }

    let mut value = 0.0_f64;
    for ch in digits.chars() {
        match ch.to_digit(radix) {
            Some(digit) => value = value * f64::from(radix) + f64::from(digit),
            None => return Some(None),
        }
    }
    Some(Some(value))
}

pub fn format_js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }

    format!("{value}")
}

pub fn normalize_rating(raw: &str) -> Option<String> {
    parse_js_number(raw)
        .filter(|value| !value.is_nan())
        .map(format_js_number)
}

#[cfg(test)]
mod tests {
    use super::{format_js_number, normalize_rating};

    #[test]
    fn rating_normalization_follows_number_semantics() {
        assert_eq!(normalize_rating("1.0").as_deref(), Some("1"));
        assert_eq!(normalize_rating("01").as_deref(), Some("1"));
        assert_eq!(normalize_rating("0.50").as_deref(), Some("0.5"));
        assert_eq!(normalize_rating("-0").as_deref(), Some("0"));
        assert_eq!(normalize_rating("1e3").as_deref(), Some("1000"));
        assert_eq!(normalize_rating("0x1A").as_deref(), Some("26"));
        assert_eq!(normalize_rating(".5").as_deref(), Some("0.5"));
        assert_eq!(normalize_rating("Infinity").as_deref(), Some("Infinity"));
        assert_eq!(normalize_rating("1e21").as_deref(), Some("1e+21"));
        assert_eq!(normalize_rating("0.0000001").as_deref(), Some("1e-7"));
        assert_eq!(normalize_rating("abc"), None);
        assert_eq!(normalize_rating("inf"), None);
        assert_eq!(normalize_rating("NaN"), None);
        assert_eq!(normalize_rating("1,5"), None);
        assert_eq!(normalize_rating("0x"), None);
    }

    #[test]
    fn large_and_tiny_numbers_use_exponent_form() {
        assert_eq!(format_js_number(1.5e22), "1.5e+22");
        assert_eq!(format_js_number(-2.5e-9), "-2.5e-9");
        assert_eq!(format_js_number(123456.789), "123456.789");
    }
}
