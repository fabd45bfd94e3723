pub mod classifier;
pub mod error;
pub mod loader;
pub mod map;
pub mod ttest;
