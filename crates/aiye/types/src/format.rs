//! Display formatting for amounts and percentages.

/// Format an amount of money for display.
///
/// USD amounts get a `$` prefix and thousands separators (`$1,234.50`);
/// other currencies are rendered as `1,234.50 EUR`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let body = format!("{}.{:02}", whole, cents % 100);
    let sign = if negative { "-" } else { "" };

    if currency.eq_ignore_ascii_case("USD") {
        format!("{}${}", sign, body)
    } else {
        format!("{}{} {}", sign, body, currency.to_ascii_uppercase())
    }
}

/// Format a percentage with a fixed number of decimals, e.g. `42.5%`.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
