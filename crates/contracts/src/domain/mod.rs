pub mod a001_invoice;
pub mod a002_company;
