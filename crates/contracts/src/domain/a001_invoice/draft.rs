use serde::{Deserialize, Serialize};

/// Currency sent with every generated invoice
pub const DEFAULT_CURRENCY: &str = "EUR";

// ============================================================================
// Parties
// ============================================================================

/// Postal address of a seller or buyer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub zip_code: String,
    pub city: String,
    /// ISO 3166-1 alpha-2, e.g. "FR"
    pub country_code: String,
}

/// Seller or buyer of an invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub address: Address,
    pub vat_id: Option<String>,
    pub siret: Option<String>,
    pub email: Option<String>,
}

// ============================================================================
// Lines, payment, references
// ============================================================================

/// One invoiced line. Values that failed to parse are carried as NaN and
/// serialize as `null`; the backend rejects them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// Percent, e.g. 20.0 for 20%
    pub vat_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub iban: Option<String>,
    /// UNTDID 4461 payment means code
    pub mode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct References {
    pub buyer_reference: Option<String>,
    pub order_reference: Option<String>,
}

// ============================================================================
// Submission payload
// ============================================================================

/// Body of `POST /invoices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    /// `YYYY-MM-DD`, forwarded as typed in the date input
    pub date: String,
    pub seller: Party,
    pub buyer: Party,
    pub items: Vec<LineItem>,
    pub payment: Payment,
    pub references: References,
    pub currency: String,
}

impl InvoiceDraft {
    /// Suggested name of the PDF returned for this draft
    pub fn pdf_file_name(&self) -> String {
        format!("facture_{}.pdf", self.invoice_number)
    }
}

/// Maps an empty input value to an absent optional field.
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn party(name: &str) -> Party {
        Party {
            name: name.to_string(),
            address: Address {
                street: "1 rue de la Paix".to_string(),
                zip_code: "75002".to_string(),
                city: "Paris".to_string(),
                country_code: "FR".to_string(),
            },
            ..Party::default()
        }
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty(" "), Some(" ".to_string()));
        assert_eq!(non_empty("FR44"), Some("FR44".to_string()));
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let draft = InvoiceDraft {
            invoice_number: "FV-2024-001".to_string(),
            date: "2024-03-15".to_string(),
            seller: party("Vendeur"),
            buyer: party("Acheteur"),
            items: vec![LineItem {
                description: "Conseil".to_string(),
                quantity: 2.0,
                unit_price: 100.0,
                vat_rate: 20.0,
            }],
            payment: Payment {
                iban: None,
                mode: "58".to_string(),
            },
            references: References::default(),
            currency: DEFAULT_CURRENCY.to_string(),
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["seller"]["vat_id"], json!(null));
        assert_eq!(value["buyer"]["siret"], json!(null));
        assert_eq!(value["payment"]["iban"], json!(null));
        assert_eq!(value["references"]["order_reference"], json!(null));
        assert_eq!(value["items"][0]["unit_price"], json!(100.0));
        assert_eq!(value["currency"], json!("EUR"));
    }

    #[test]
    fn test_nan_quantity_is_forwarded_as_null() {
        let item = LineItem {
            description: "x".to_string(),
            quantity: f64::NAN,
            unit_price: 1.0,
            vat_rate: 20.0,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["quantity"], json!(null));
    }

    #[test]
    fn test_pdf_file_name() {
        let draft = InvoiceDraft {
            invoice_number: "F-7".to_string(),
            date: String::new(),
            seller: Party::default(),
            buyer: Party::default(),
            items: Vec::new(),
            payment: Payment::default(),
            references: References::default(),
            currency: DEFAULT_CURRENCY.to_string(),
        };
        assert_eq!(draft.pdf_file_name(), "facture_F-7.pdf");
    }
}
