//! Number formatting for report cells

/// Compact suffixes, largest first
const COMPACT_UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Normalize -0.0 to 0.0 for cleaner display
pub fn normalize_zero(val: f64) -> f64 {
    if val == 0.0 { 0.0 } else { val }
}

/// Short form for dashboard cells: 1234567 → "1.2M", 2500 → "2.5K", 532 → "532"
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();

    for (scale, suffix) in COMPACT_UNITS {
        // 999_950 would otherwise print as "1000.0K"
        if abs >= scale * 0.99995 {
            return format!("{:.1}{}", value / scale, suffix);
        }
    }

    // 999.5 rounds to 1000 and belongs in the K bucket
    let whole = normalize_zero(value.round());
    if whole.abs() >= 1e3 {
        return format!("{:.1}K", value / 1e3);
    }

    format!("{}", whole)
}

/// Two decimals with thousands separators: 1234567.891 → "1,234,567.89"
pub fn format_money(value: f64) -> String {
    let rounded = normalize_zero((value * 100.0).round() / 100.0);
    let formatted = format!("{:.2}", rounded.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
