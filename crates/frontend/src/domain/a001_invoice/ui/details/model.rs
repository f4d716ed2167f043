use contracts::domain::a001_invoice::InvoiceSummary;

use crate::shared::date_utils::format_date;
use crate::shared::number_format::format_currency;

#[derive(Debug, Clone, PartialEq)]
pub struct PartyBlock {
    pub title: &'static str,
    pub name: String,
    pub address: Option<String>,
    pub vat_id: Option<String>,
}

impl PartyBlock {
    fn new(title: &'static str, name: &str, address: &Option<String>, vat: &Option<String>) -> Self {
        let present = |v: &Option<String>| v.as_ref().filter(|s| !s.trim().is_empty()).cloned();
        Self {
            title,
            name: name.to_string(),
            address: present(address),
            vat_id: present(vat),
        }
    }
}

/// Display values of the detail panel
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDetail {
    pub id: String,
    pub date: String,
    pub seller: PartyBlock,
    pub buyer: PartyBlock,
    pub total_ht: String,
    /// `total_ttc - total_ht`
    pub vat: String,
    pub total_ttc: String,
    pub imported: bool,
}

impl InvoiceDetail {
    pub fn from_summary(invoice: &InvoiceSummary) -> Self {
        let currency = invoice.currency.as_str();
        Self {
            id: invoice.id.clone(),
            date: format_date(&invoice.date),
            seller: PartyBlock::new(
                "Vendeur",
                &invoice.seller_name,
                &invoice.seller_address,
                &invoice.seller_vat,
            ),
            buyer: PartyBlock::new(
                "Acheteur",
                &invoice.buyer_name,
                &invoice.buyer_address,
                &invoice.buyer_vat,
            ),
            total_ht: format_currency(invoice.total_ht, currency),
            vat: format_currency(invoice.vat_amount(), currency),
            total_ttc: format_currency(invoice.total_ttc, currency),
            imported: invoice.source.as_deref() == Some("upload"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vat_is_difference_of_totals() {
        let invoice: InvoiceSummary = serde_json::from_str(
            r#"{
                "id": "F-2024-001",
                "date": "2024-03-15",
                "seller_name": "ACME SAS",
                "seller_address": "12 rue de la Paix, 75002 Paris",
                "seller_vat": "FR44732829320",
                "buyer_name": "Client SARL",
                "buyer_address": "",
                "total_ht": 1000.0,
                "total_ttc": 1200.0,
                "total_tax": 999.0
            }"#,
        )
        .unwrap();

        let detail = InvoiceDetail::from_summary(&invoice);
        assert_eq!(detail.date, "15/03/2024");
        assert_eq!(detail.total_ht, "1 000,00 €");
        assert_eq!(detail.vat, "200,00 €");
        assert_eq!(detail.total_ttc, "1 200,00 €");
        assert_eq!(detail.seller.vat_id.as_deref(), Some("FR44732829320"));
        assert_eq!(detail.buyer.address, None);
        assert_eq!(detail.buyer.vat_id, None);
        assert!(!detail.imported);
    }

    #[test]
    fn test_missing_totals_render_as_zero() {
        let invoice: InvoiceSummary =
            serde_json::from_str(r#"{"id": "X", "source": "upload"}"#).unwrap();
        let detail = InvoiceDetail::from_summary(&invoice);
        assert_eq!(detail.total_ttc, "0,00 €");
        assert_eq!(detail.vat, "0,00 €");
        assert_eq!(detail.date, "-");
        assert!(detail.imported);
    }
}
