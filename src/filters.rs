//! Display formatting for amounts and participant identifiers.

/// Amount with thousands separators and at most two decimals.
/// Example: 1234567.891 -> "1,234,567.89", 15.0 -> "15"
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let is_negative = value < 0.0;
    let hundredths = (value.abs() * 100.0).round() as u64;
    let whole = hundredths / 100;
    let fractional = hundredths % 100;

    let mut formatted = format_with_thousands(whole, ',');
    if fractional != 0 {
        let decimals = format!("{:02}", fractional);
        formatted.push('.');
        formatted.push_str(decimals.trim_end_matches('0'));
    }

    if is_negative && hundredths != 0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Compact axis label: 950 -> "950", 12500 -> "12.5K", 3000000 -> "3M".
///
/// The unit is picked after rounding to one decimal, so 999950 is "1M".
pub fn abbreviate(value: f64) -> String {
    const UNITS: [(f64, &str); 4] = [
        (1.0, ""),
        (1_000.0, "K"),
        (1_000_000.0, "M"),
        (1_000_000_000.0, "B"),
    ];

    let abs = value.abs();
    let mut unit = UNITS.iter().rposition(|&(size, _)| abs >= size).unwrap_or(0);
    if unit + 1 < UNITS.len() && ((abs / UNITS[unit].0) * 10.0).round() >= 10_000.0 {
        unit += 1;
    }

    let (size, suffix) = UNITS[unit];
    let text = format!("{:.1}", value / size);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{}{}", text, suffix)
}

/// Shorten long identifiers (addresses) for axis labels, keeping both ends.
pub fn shorten_id(id: &str, max_chars: usize) -> String {
    let count = id.chars().count();
    if count <= max_chars || max_chars < 5 {
        return id.to_string();
    }

    let tail = (max_chars - 1) / 2;
    let head = max_chars - 1 - tail;
    let start: String = id.chars().take(head).collect();
    let end: String = id.chars().skip(count - tail).collect();
    format!("{}\u{2026}{}", start, end)
}

/// Format a number with thousands separators.
fn format_with_thousands(n: u64, sep: char) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }

    result
}
