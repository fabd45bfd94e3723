pub mod county;
pub mod indicator;
pub mod metric;
pub mod month_sequence;
pub mod place_record;
pub mod series_key;
