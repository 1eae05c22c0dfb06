use rust_decimal::Decimal;

/// Inserts `,` every three digits of a string of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats whole dollars, e.g. `$6,305,924` or `-$1,500,000`.
///
/// Cents are rounded away; every salary in this tool is whole dollars.
pub fn format_currency(amount: Decimal) -> String {
    let whole = amount.round_dp(0);
    let sign = if whole.is_sign_negative() && !whole.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = whole.abs().trunc().to_string();
    format!("{sign}${}", group_thousands(&digits))
}

/// Formats a statistic without a trailing `.0` for whole numbers.
pub fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
