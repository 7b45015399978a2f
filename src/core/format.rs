/// Formats an amount as `KES 1,234.56`; negatives keep the sign after the currency.
pub fn kes(amount: f64) -> String {
    format!("KES {}", grouped(amount))
}

/// Two-decimal amount with comma thousands separators.
pub fn grouped(amount: f64) -> String {
    let body = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));

    let mut out = String::with_capacity(body.len() + int_part.len() / 3 + 1);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push('.');
    out.push_str(frac_part);

    if amount < 0.0 && out.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.insert(0, '-');
    }
    out
}

/// Fractional rate rendered as a percentage with two decimals, e.g. `12.25%`.
pub fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_inserts_thousands_separators() {
        assert_eq!(grouped(0.0), "0.00");
        assert_eq!(grouped(999.5), "999.50");
        assert_eq!(grouped(1_000.0), "1,000.00");
        assert_eq!(grouped(120_000.0), "120,000.00");
        assert_eq!(grouped(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn negative_amounts_keep_sign_unless_they_round_to_zero() {
        assert_eq!(kes(-2_500.0), "KES -2,500.00");
        assert_eq!(kes(-0.001), "KES 0.00");
    }

    #[test]
    fn percent_scales_fraction() {
        assert_eq!(percent(0.1225), "12.25%");
        assert_eq!(percent(0.0), "0.00%");
    }
}
