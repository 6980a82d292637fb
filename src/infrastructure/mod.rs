//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{default_config_path, default_data_file, default_log_file, expand_tilde, get_data_dir};
