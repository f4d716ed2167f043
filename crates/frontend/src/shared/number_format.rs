//! French number and currency formatting

/// Groups the integer part with spaces and uses a decimal comma
///
/// `1234.567` with 2 decimals -> `"1 234,57"`
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Symbol for the currencies the backend emits; other codes are printed as-is
fn currency_symbol(currency: &str) -> &str {
    match currency {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        "CHF" => "CHF",
        other => other,
    }
}

/// `1234.5, "EUR"` -> `"1 234,50 €"`; non-finite amounts render as zero
pub fn format_currency(amount: f64, currency: &str) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let currency = if currency.is_empty() { "EUR" } else { currency };
    format!(
        "{} {}",
        format_number_with_decimals(amount, 2),
        currency_symbol(currency)
    )
}

/// Human readable file size: octets, Ko, Mo
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} octets", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} Ko", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} Mo", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1 235");
        assert_eq!(format_number_with_decimals(1234.567, 2), "1 234,57");
        assert_eq!(format_number_with_decimals(1234567.891, 2), "1 234 567,89");
        assert_eq!(format_number_with_decimals(-1234.5, 2), "-1 234,50");
        assert_eq!(format_number_with_decimals(0.0, 2), "0,00");
        assert_eq!(format_number_with_decimals(999.0, 0), "999");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5, "EUR"), "1 234,50 €");
        assert_eq!(format_currency(20.0, "USD"), "20,00 $");
        assert_eq!(format_currency(f64::NAN, "EUR"), "0,00 €");
        assert_eq!(format_currency(1.0, ""), "1,00 €");
        assert_eq!(format_currency(1.0, "JPY"), "1,00 JPY");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 octets");
        assert_eq!(format_file_size(2048), "2.0 Ko");
        assert_eq!(format_file_size(3 * 1024 * 1024 + 512 * 1024), "3.5 Mo");
    }
}
