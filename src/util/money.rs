//! Money formatting and parsing utilities
//!
//! Provides the permissive currency handling used across the kiosk
//! screens: digit-only amount entry with thousands grouping, and
//! two-decimal balance display.

/// Format a raw amount entry with thousands separators
///
/// All non-digit characters are stripped before grouping, so the
/// function is idempotent: formatting an already-formatted string
/// yields the same string. Empty or digit-free input stays empty.
///
/// # Examples
/// ```
/// use fabank::util::money::format_amount;
///
/// assert_eq!(format_amount("25000"), "25,000");
/// assert_eq!(format_amount("25,000"), "25,000");
/// assert_eq!(format_amount("abc"), "");
/// ```
pub fn format_amount(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return String::new();
    }

    let trimmed = digits.trim_start_matches('0');
    let canonical = if trimmed.is_empty() { "0" } else { trimmed };
    group_thousands(canonical)
}

/// Parse an amount string into a number
///
/// Separators are ignored; unparsable or empty input is treated as 0
/// rather than an error. Validation happens at the action boundary,
/// never here.
///
/// # Examples
/// ```
/// use fabank::util::money::parse_amount;
///
/// assert_eq!(parse_amount("2,547.63"), 2547.63);
/// assert_eq!(parse_amount(""), 0.0);
/// assert_eq!(parse_amount("not a number"), 0.0);
/// ```
pub fn parse_amount(input: &str) -> f64 {
    input.replace(',', "").trim().parse::<f64>().unwrap_or(0.0)
}

/// Format a balance with thousands separators and two decimals
///
/// # Examples
/// ```
/// use fabank::util::money::format_balance;
///
/// assert_eq!(format_balance(2547.63), "2,547.63");
/// assert_eq!(format_balance(1000000.0), "1,000,000.00");
/// ```
pub fn format_balance(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => (fixed.as_str(), "00"),
    };

    let grouped = group_thousands(int_part);
    if value < 0.0 {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// Prefix a formatted value with a currency code
///
/// # Examples
/// ```
/// use fabank::util::money::with_currency;
///
/// assert_eq!(with_currency("GHC", "2,547.63"), "GHC2,547.63");
/// ```
pub fn with_currency(code: &str, formatted: &str) -> String {
    format!("{}{}", code, formatted)
}

/// Insert a comma every three digits from the right
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}
