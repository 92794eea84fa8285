//! Display formatting for KPI values.

/// `$1,234.56`, or `-$1,234.56` for negatives. Non-finite values print as-is.
pub fn currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${}.{frac}", group_thousands(whole))
}

/// `12.34%`; an undefined mean prints as `NaN%`.
pub fn percent(value: f64) -> String {
    if value.is_nan() {
        "NaN%".to_string()
    } else {
        format!("{value:.2}%")
    }
}

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency(999.999), "$1,000.00");
        assert_eq!(currency(1234567.5), "$1,234,567.50");
        assert_eq!(currency(-2500.0), "-$2,500.00");
        assert_eq!(currency(-0.001), "$0.00");
    }

    #[test]
    fn percent_marks_undefined() {
        assert_eq!(percent(20.0), "20.00%");
        assert_eq!(percent(-3.456), "-3.46%");
        assert_eq!(percent(f64::NAN), "NaN%");
    }
}
