use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::draft::DEFAULT_CURRENCY;

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Invoice metadata as returned by `GET /invoices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub seller_address: Option<String>,
    #[serde(default)]
    pub seller_vat: Option<String>,
    #[serde(default)]
    pub buyer_name: String,
    #[serde(default)]
    pub buyer_address: Option<String>,
    #[serde(default)]
    pub buyer_vat: Option<String>,
    #[serde(default)]
    pub total_ht: f64,
    #[serde(default)]
    pub total_ttc: f64,
    #[serde(default)]
    pub total_tax: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// "upload" for imported invoices
    #[serde(default)]
    pub source: Option<String>,
}

impl InvoiceSummary {
    /// `created_at` when present and non-empty, otherwise `date`
    pub fn effective_date(&self) -> &str {
        match self.created_at.as_deref() {
            Some(created) if !created.is_empty() => created,
            _ => &self.date,
        }
    }

    /// Parsed effective date; `None` when it cannot be read
    pub fn sort_key(&self) -> Option<NaiveDateTime> {
        parse_timestamp(self.effective_date())
    }

    /// VAT shown in the detail panel
    pub fn vat_amount(&self) -> f64 {
        self.total_ttc - self.total_ht
    }
}

/// Sorts newest first. Entries whose date cannot be parsed go last.
pub fn sort_newest_first(invoices: &mut [InvoiceSummary]) {
    invoices.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
}

/// Accepts RFC 3339, naive ISO timestamps with `T` or space separator, and
/// bare dates (read as midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn summary(id: &str, date: &str, created_at: Option<&str>) -> InvoiceSummary {
        InvoiceSummary {
            id: id.to_string(),
            date: date.to_string(),
            created_at: created_at.map(str::to_string),
            seller_name: "Vendeur".to_string(),
            seller_address: None,
            seller_vat: None,
            buyer_name: "Acheteur".to_string(),
            buyer_address: None,
            buyer_vat: None,
            total_ht: 100.0,
            total_ttc: 120.0,
            total_tax: None,
            currency: "EUR".to_string(),
            source: None,
        }
    }

    #[test]
    fn test_effective_date_prefers_created_at() {
        let s = summary("A", "2024-01-01", Some("2024-02-01T10:00:00Z"));
        assert_eq!(s.effective_date(), "2024-02-01T10:00:00Z");

        let s = summary("B", "2024-01-01", None);
        assert_eq!(s.effective_date(), "2024-01-01");

        let s = summary("C", "2024-01-01", Some(""));
        assert_eq!(s.effective_date(), "2024-01-01");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let midnight = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-03-15"), Some(midnight));
        assert!(parse_timestamp("2024-03-15T14:02:26.123Z").is_some());
        assert!(parse_timestamp("2024-03-15 14:02:26.123456").is_some());
        assert!(parse_timestamp("2024-03-15T14:02:26+02:00").is_some());
        assert_eq!(parse_timestamp("hier"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_sort_newest_first_mixes_created_at_and_date() {
        let mut list = vec![
            summary("old", "2023-05-01", None),
            summary("created", "2020-01-01", Some("2024-06-01 09:00:00")),
            summary("mid", "2024-01-10", None),
            summary("broken", "n/a", None),
        ];
        sort_newest_first(&mut list);
        let ids: Vec<&str> = list.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["created", "mid", "old", "broken"]);
    }

    #[test]
    fn test_vat_amount() {
        let s = summary("A", "2024-01-01", None);
        assert!((s.vat_amount() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let s: InvoiceSummary =
            serde_json::from_str(r#"{"id":"F1","date":"2024-01-01","seller_name":"S","buyer_name":"B"}"#)
                .unwrap();
        assert_eq!(s.total_ht, 0.0);
        assert_eq!(s.total_ttc, 0.0);
        assert_eq!(s.currency, "EUR");
        assert_eq!(s.created_at, None);
    }

    proptest! {
        #[test]
        fn prop_sorted_strictly_descending_for_distinct_dates(
            days in proptest::collection::hash_set(0u32..5000, 1..30)
        ) {
            let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
            let mut list: Vec<InvoiceSummary> = days
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    let date = base + chrono::Days::new(u64::from(*d));
                    let date = date.format("%Y-%m-%d").to_string();
                    if i % 2 == 0 {
                        summary(&i.to_string(), "1999-01-01", Some(&format!("{date}T08:00:00")))
                    } else {
                        summary(&i.to_string(), &date, None)
                    }
                })
                .collect();
            sort_newest_first(&mut list);
            for pair in list.windows(2) {
                let (a, b) = (pair[0].sort_key(), pair[1].sort_key());
                prop_assert!(a.map(|x| x.date()) > b.map(|x| x.date()));
            }
        }
    }
}
