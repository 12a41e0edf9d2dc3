//! Price formatting.
//!
//! Rupee amounts use Indian digit grouping (`₹11,50,000`); other currencies
//! fall back to Western grouping with the ISO code as prefix.

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_uppercase().as_str() {
        "INR" => Some("₹"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}

/// Groups the digits of `n`: the last three together, then pairs (`indian`)
/// or triples.
fn group_digits(n: u64, indian: bool) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let step = if indian { 2 } else { 3 };

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Formats a price with no fractional digits.
pub fn format_price(amount: f64, currency: &str) -> String {
    let negative = amount < 0.0;
    let rounded = amount.abs().round() as u64;
    let indian = currency.eq_ignore_ascii_case("INR");
    let body = group_digits(rounded, indian);
    let sign = if negative { "-" } else { "" };
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{body}"),
        None => format!("{sign}{} {body}", currency.to_ascii_uppercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_price(89999.0, "INR"), "₹89,999");
        assert_eq!(format_price(1150000.0, "INR"), "₹11,50,000");
        assert_eq!(format_price(124999.4, "inr"), "₹1,24,999");
        assert_eq!(format_price(999.0, "INR"), "₹999");
    }

    #[test]
    fn test_western_grouping() {
        assert_eq!(format_price(1150000.0, "USD"), "$1,150,000");
        assert_eq!(format_price(42.0, "CHF"), "CHF 42");
    }

    #[test]
    fn test_zero_and_negative() {
        assert_eq!(format_price(0.0, "INR"), "₹0");
        assert_eq!(format_price(-1500.0, "INR"), "-₹1,500");
    }
}
