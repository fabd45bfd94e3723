pub mod county_table;
pub mod error;
