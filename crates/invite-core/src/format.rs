//! Compact rendering of player and visit counters (`1.2K`, `150K`, `2.5B`).

/// Magnitude thresholds, largest first.
const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Render a counter as a short human-readable string.
///
/// Missing, NaN and infinite values render as `"0"`. Values of a thousand
/// and above are scaled to `K`/`M`/`B`; a scaled value of 100 or more drops
/// its decimals, anything smaller keeps one decimal unless it is `.0`.
/// Smaller values are rounded and grouped with `,` separators.
pub fn format_compact(value: impl Into<Option<f64>>) -> String {
    let Some(n) = value.into().filter(|v| v.is_finite()) else {
        return "0".to_string();
    };

    let abs = n.abs();
    let sign = if n < 0.0 { "-" } else { "" };

    for (unit, symbol) in UNITS {
        if abs >= unit {
            let scaled = abs / unit;
            let digits = if scaled >= 100.0 {
                format!("{}", scaled.round())
            } else {
                let tenths = format!("{:.1}", (scaled * 10.0).round() / 10.0);
                match tenths.strip_suffix(".0") {
                    Some(whole) => whole.to_string(),
                    None => tenths,
                }
            };
            return format!("{sign}{digits}{symbol}");
        }
    }

    let rounded = abs.round() as u64;
    if rounded == 0 {
        return "0".to_string();
    }
    format!("{sign}{}", group_thousands(rounded))
}

/// Insert `,` between every group of three digits.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
