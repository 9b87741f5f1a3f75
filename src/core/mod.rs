pub mod aggregate;
pub mod config;
pub mod csv;
pub mod dates;
pub mod filter;
pub mod formatter;
pub mod loader;
pub mod models;
pub mod numeric;
pub mod table;
