pub mod view;
pub mod view_model;

use leptos::prelude::*;

use crate::domain::a001_invoice::api::HttpInvoiceApi;

/// Page controller as held by the components
pub type PageHandle = StoredValue<view_model::InvoicePage<HttpInvoiceApi>, LocalStorage>;

pub use view::InvoicesPage;
