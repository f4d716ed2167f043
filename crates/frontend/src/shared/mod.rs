pub mod config;
pub mod date_utils;
pub mod download;
pub mod http;
pub mod icons;
pub mod number_format;
pub mod observable;
pub mod timer;
