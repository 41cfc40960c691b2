//! Display formatting for token rows
//!
//! Pure functions from a nullable number to a display string. Missing and NaN
//! values always render as an em dash.

use coingecko_api::Currency;

pub const MISSING: &str = "—";

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Format a number with thousands separators (e.g., 1234567.891 -> "1,234,567.89")
pub fn format_with_thousands(n: f64, decimals: usize) -> String {
    let formatted = format!("{:.prec$}", n.abs(), prec = decimals);
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut result = String::with_capacity(formatted.len() + digits.len() / 3 + 1);
    if n.is_sign_negative() && formatted.chars().any(|c| c != '0' && c != '.') {
        result.push('-');
    }
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(*c);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", result, frac),
        None => result,
    }
}

/// Spot price: six decimals below one unit, grouped with two decimals otherwise
pub fn format_price(value: Option<f64>, currency: Currency) -> String {
    let Some(price) = present(value) else {
        return MISSING.to_string();
    };
    let prefix = currency.symbol();
    if price.abs() < 1.0 {
        format!("{}{:.6}", prefix, price)
    } else {
        format!("{}{}", prefix, format_with_thousands(price, 2))
    }
}

fn scale_compact(value: f64, prefix: &str, small_decimals: usize) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{}{}{:.2}T", sign, prefix, abs / 1e12)
    } else if abs >= 1e9 {
        format!("{}{}{:.2}B", sign, prefix, abs / 1e9)
    } else if abs >= 1e6 {
        format!("{}{}{:.2}M", sign, prefix, abs / 1e6)
    } else if abs >= 1e3 {
        format!("{}{}{:.2}K", sign, prefix, abs / 1e3)
    } else {
        format!("{}{}{:.prec$}", sign, prefix, abs, prec = small_decimals)
    }
}

/// Market cap and volume: `$2.50B`, `$950.00`
pub fn format_compact(value: Option<f64>, currency: Currency) -> String {
    match present(value) {
        Some(v) => scale_compact(v, currency.symbol(), 2),
        None => MISSING.to_string(),
    }
}

/// Supply counts: same suffixes, no currency, whole units below a thousand
pub fn format_supply(value: Option<f64>) -> String {
    match present(value) {
        Some(v) => scale_compact(v, "", 0),
        None => MISSING.to_string(),
    }
}

pub fn format_rank(value: Option<f64>) -> String {
    match present(value) {
        Some(v) => format!("{:.0}", v),
        None => MISSING.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
}

/// Percentage change indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeBadge {
    pub tone: Tone,
    pub text: String,
}

impl ChangeBadge {
    pub fn arrow(&self) -> &'static str {
        match self.tone {
            Tone::Neutral => "",
            Tone::Positive => "▲",
            Tone::Negative => "▼",
        }
    }
}

pub fn change_badge(value: Option<f64>) -> ChangeBadge {
    match present(value) {
        None => ChangeBadge {
            tone: Tone::Neutral,
            text: MISSING.to_string(),
        },
        Some(v) if v >= 0.0 => ChangeBadge {
            tone: Tone::Positive,
            // -0.0 passes the check above; print it unsigned
            text: format!("+{:.2}%", v.abs()),
        },
        Some(v) => ChangeBadge {
            tone: Tone::Negative,
            text: format!("{:.2}%", v),
        },
    }
}
