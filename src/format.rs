use rust_decimal::Decimal;

/// Formats an amount as dollars, abbreviating thousands and millions.
pub fn format_currency(amount: Decimal) -> String {
    let million = Decimal::from(1_000_000);
    let thousand = Decimal::from(1_000);

    if amount >= million {
        format!("${:.1}M", amount / million)
    } else if amount >= thousand {
        format!("${:.1}K", amount / thousand)
    } else {
        format!("${:.0}", amount)
    }
}

/// Formats a duration given in hours, switching to days from 24h upwards.
pub fn format_duration(hours: f64) -> String {
    if hours >= 24.0 {
        format!("{:.1} days", hours / 24.0)
    } else {
        format!("{:.1} hours", hours)
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(2500000)), "$2.5M");
        assert_eq!(format_currency(dec!(1500)), "$1.5K");
        assert_eq!(format_currency(dec!(999)), "$999");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(36.0), "1.5 days");
        assert_eq!(format_duration(4.3), "4.3 hours");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(66.666), "66.7%");
    }
}
