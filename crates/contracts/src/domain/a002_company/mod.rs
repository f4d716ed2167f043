//! French company registry lookup

pub mod search;
pub mod vat;

pub use search::{CompanyFill, CompanySearchResponse, CompanySearchResult, Siege};
pub use vat::{french_vat_number, vat_key};
