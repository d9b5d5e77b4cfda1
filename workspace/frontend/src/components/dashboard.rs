pub mod charts;
pub mod file_list;
pub mod metrics_table;
pub mod summary;
pub mod upload;
pub mod view;
