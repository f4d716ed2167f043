use crate::domain::a001_invoice::ui::page::view_model::PageState;
use crate::shared::date_utils::format_date;
use crate::shared::number_format::format_currency;

/// One entry of the sidebar list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvoiceRow {
    pub id: String,
    pub date: String,
    pub amount: String,
    pub active: bool,
}

/// Rows in list order, with the selected invoice marked active
pub fn build_rows(state: &PageState) -> Vec<InvoiceRow> {
    state
        .invoices
        .iter()
        .map(|inv| InvoiceRow {
            id: inv.id.clone(),
            date: format_date(&inv.date),
            amount: format_currency(inv.total_ttc, &inv.currency),
            active: state.is_active(&inv.id),
        })
        .collect()
}
