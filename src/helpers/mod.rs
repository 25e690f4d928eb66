pub mod config_helper;
pub mod timestamp_helper;
