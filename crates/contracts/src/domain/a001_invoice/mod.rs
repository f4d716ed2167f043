//! Invoice wire types shared with the invoicing backend

pub mod document;
pub mod draft;
pub mod summary;
pub mod upload;

pub use document::DocumentFormat;
pub use draft::{Address, InvoiceDraft, LineItem, Party, Payment, References, DEFAULT_CURRENCY};
pub use summary::{sort_newest_first, InvoiceSummary};
pub use upload::UploadedInvoice;
