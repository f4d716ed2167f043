//! Date formatting for list and detail views

/// Format an ISO date or timestamp as `DD/MM/YYYY`; `-` when empty.
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return "-".to_string();
    }
    let date_part = date_str
        .split(['T', ' '])
        .next()
        .unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Today's date as expected by `<input type="date">`
pub fn today_iso() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
        assert_eq!(format_date("2024-03-15 14:02:26.123456"), "15/03/2024");
    }

    #[test]
    fn test_empty_and_invalid() {
        assert_eq!(format_date(""), "-");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_today_iso_shape() {
        let today = today_iso();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
    }
}
