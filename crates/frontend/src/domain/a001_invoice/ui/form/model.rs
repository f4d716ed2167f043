//! Invoice form state and its conversion to the submission payload

use contracts::domain::a001_invoice::draft::non_empty;
use contracts::domain::a001_invoice::{
    Address, InvoiceDraft, LineItem, Party, Payment, References, DEFAULT_CURRENCY,
};
use contracts::domain::a002_company::CompanyFill;
use thiserror::Error;

use crate::shared::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Une facture doit avoir au moins une ligne.")]
    LastLineItem,
    #[error("Ligne introuvable")]
    UnknownLineItem,
}

/// Which party block of the form a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyRole {
    Seller,
    Buyer,
}

impl PartyRole {
    pub fn title(self) -> &'static str {
        match self {
            PartyRole::Seller => "Vendeur",
            PartyRole::Buyer => "Acheteur",
        }
    }

    /// Only the seller block collects SIRET and email
    pub fn has_siret(self) -> bool {
        matches!(self, PartyRole::Seller)
    }
}

// ============================================================================
// Line items
// ============================================================================

/// One editable row; values are kept as typed
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemRow {
    /// Render key, not sent to the backend
    pub key: u64,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub vat_rate: String,
}

/// An editable cell of a line-item row
#[derive(Clone, Copy)]
pub struct LineItemColumn {
    pub class: &'static str,
    pub placeholder: &'static str,
    pub input_type: &'static str,
    pub get: fn(&LineItemRow) -> &String,
    pub set: fn(&mut LineItemRow) -> &mut String,
}

impl LineItemColumn {
    /// Numeric inputs accept decimals
    pub fn step(&self) -> Option<&'static str> {
        (self.input_type == "number").then_some("any")
    }
}

pub const LINE_ITEM_COLUMNS: [LineItemColumn; 4] = [
    LineItemColumn {
        class: "item-desc",
        placeholder: "Description",
        input_type: "text",
        get: |r| &r.description,
        set: |r| &mut r.description,
    },
    LineItemColumn {
        class: "item-qty",
        placeholder: "Qte",
        input_type: "number",
        get: |r| &r.quantity,
        set: |r| &mut r.quantity,
    },
    LineItemColumn {
        class: "item-price",
        placeholder: "Prix HT",
        input_type: "number",
        get: |r| &r.unit_price,
        set: |r| &mut r.unit_price,
    },
    LineItemColumn {
        class: "item-vat",
        placeholder: "TVA %",
        input_type: "number",
        get: |r| &r.vat_rate,
        set: |r| &mut r.vat_rate,
    },
];

impl LineItemRow {
    fn template(key: u64) -> Self {
        Self {
            key,
            description: String::new(),
            quantity: "1".to_string(),
            unit_price: String::new(),
            vat_rate: "20".to_string(),
        }
    }

    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            description: self.description.clone(),
            quantity: parse_float(&self.quantity),
            unit_price: parse_float(&self.unit_price),
            vat_rate: parse_float(&self.vat_rate),
        }
    }
}

/// Ordered rows, never empty
#[derive(Debug, Clone, PartialEq)]
pub struct LineItems {
    rows: Vec<LineItemRow>,
    next_key: u64,
}

impl Default for LineItems {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItems {
    pub fn new() -> Self {
        Self {
            rows: vec![LineItemRow::template(0)],
            next_key: 1,
        }
    }

    pub fn rows(&self) -> &[LineItemRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a templated row and returns its key
    pub fn add_item(&mut self) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        self.rows.push(LineItemRow::template(key));
        key
    }

    /// Removes a row unless it is the last one
    pub fn remove_item(&mut self, key: u64) -> Result<(), FormError> {
        let index = self
            .rows
            .iter()
            .position(|r| r.key == key)
            .ok_or(FormError::UnknownLineItem)?;
        if self.rows.len() <= 1 {
            return Err(FormError::LastLineItem);
        }
        self.rows.remove(index);
        Ok(())
    }

    pub fn update(&mut self, key: u64, f: impl FnOnce(&mut LineItemRow)) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.key == key) {
            f(row);
        }
    }

    pub fn to_line_items(&self) -> Vec<LineItem> {
        self.rows.iter().map(LineItemRow::to_line_item).collect()
    }
}

// ============================================================================
// Form
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartyForm {
    pub name: String,
    pub street: String,
    pub zip_code: String,
    pub city: String,
    pub country_code: String,
    pub vat_id: String,
    pub siret: String,
    pub email: String,
}

impl PartyForm {
    fn with_country(country_code: &str) -> Self {
        Self {
            country_code: country_code.to_string(),
            ..Self::default()
        }
    }

    fn to_party(&self, role: PartyRole) -> Party {
        let (siret, email) = if role.has_siret() {
            (non_empty(&self.siret), non_empty(&self.email))
        } else {
            (None, None)
        };
        Party {
            name: self.name.clone(),
            address: Address {
                street: self.street.clone(),
                zip_code: self.zip_code.clone(),
                city: self.city.clone(),
                country_code: self.country_code.clone(),
            },
            vat_id: non_empty(&self.vat_id),
            siret,
            email,
        }
    }

    /// Writes a registry result into the block
    pub fn apply_fill(&mut self, fill: &CompanyFill, role: PartyRole) {
        self.name = fill.name.clone();
        if role.has_siret() {
            self.siret = fill.siret.clone();
        }
        self.vat_id = fill.vat_id.clone().unwrap_or_default();
        self.street = fill.street.clone();
        self.zip_code = fill.zip_code.clone();
        self.city = fill.city.clone();
        self.country_code = fill.country_code.clone();
    }
}

/// Everything typed into the creation form
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceForm {
    pub invoice_number: String,
    pub date: String,
    pub seller: PartyForm,
    pub buyer: PartyForm,
    pub items: LineItems,
    pub payment_iban: String,
    pub payment_mode: String,
    pub buyer_reference: String,
    pub order_reference: String,
}

impl InvoiceForm {
    /// Initial form: one row, today's date, configured IBAN and country
    pub fn new(config: &AppConfig, today: String) -> Self {
        Self {
            invoice_number: String::new(),
            date: today,
            seller: PartyForm::with_country(&config.default_country_code),
            buyer: PartyForm::with_country(&config.default_country_code),
            items: LineItems::new(),
            payment_iban: config.default_iban.clone(),
            payment_mode: config.default_payment_mode.clone(),
            buyer_reference: String::new(),
            order_reference: String::new(),
        }
    }

    pub fn party(&self, role: PartyRole) -> &PartyForm {
        match role {
            PartyRole::Seller => &self.seller,
            PartyRole::Buyer => &self.buyer,
        }
    }

    pub fn party_mut(&mut self, role: PartyRole) -> &mut PartyForm {
        match role {
            PartyRole::Seller => &mut self.seller,
            PartyRole::Buyer => &mut self.buyer,
        }
    }

    /// Builds the `POST /invoices` body. Empty optional inputs become `None`.
    pub fn to_draft(&self) -> InvoiceDraft {
        InvoiceDraft {
            invoice_number: self.invoice_number.clone(),
            date: self.date.clone(),
            seller: self.seller.to_party(PartyRole::Seller),
            buyer: self.buyer.to_party(PartyRole::Buyer),
            items: self.items.to_line_items(),
            payment: Payment {
                iban: non_empty(&self.payment_iban),
                mode: self.payment_mode.clone(),
            },
            references: References {
                buyer_reference: non_empty(&self.buyer_reference),
                order_reference: non_empty(&self.order_reference),
            },
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Reads the longest numeric prefix after leading whitespace, like the
/// browser's `parseFloat`. Returns NaN when there is none.
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let rest = &s[end..];
    if rest.starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if has_digits || frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return f64::NAN;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    s[..end].parse().unwrap_or(f64::NAN)
}
