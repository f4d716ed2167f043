pub mod error_detail;
