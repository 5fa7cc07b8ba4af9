/// Placeholder rendered for any value the backend left out
pub const MISSING: &str = "N/A";

/// Format a number the way a JS template literal would: whole numbers
/// without decimals, everything else as-is
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        let rounded = (value * 100.0).round() / 100.0;
        format!("{}", rounded)
    }
}

/// Format a nightly price as `$123` or `$123.45`, `N/A` when missing
pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("${}", format_amount(v)),
        _ => MISSING.to_string(),
    }
}

/// Format an optional float with fixed decimals
pub fn format_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => MISSING.to_string(),
    }
}

/// Format a count with thousands separators, e.g. `48,895`
pub fn format_count(value: Option<u64>) -> String {
    let Some(n) = value else {
        return MISSING.to_string();
    };
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning `N/A` if None
pub fn format_optional(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}

/// Case-insensitive substring match
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(150.0), "150");
        assert_eq!(format_amount(99.5), "99.5");
        assert_eq!(format_amount(66.666), "66.67");
    }

    #[test]
    fn test_format_price_and_value() {
        assert_eq!(format_price(Some(152.72)), "$152.72");
        assert_eq!(format_price(None), "N/A");
        assert_eq!(format_price(Some(f64::NAN)), "N/A");
        assert_eq!(format_value(Some(1.366), 2), "1.37");
        assert_eq!(format_value(None, 1), "N/A");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(Some(48895)), "48,895");
        assert_eq!(format_count(Some(1000000)), "1,000,000");
        assert_eq!(format_count(Some(999)), "999");
        assert_eq!(format_count(None), "N/A");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Café au lait", 7), "Café...");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Cozy Brooklyn Loft", "brooklyn"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("Loft", "villa"));
    }
}
