pub mod cdo_api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod writer;
