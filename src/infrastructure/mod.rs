//! Filesystem and environment helpers.

pub mod paths;

pub use paths::{config_file, expand_tilde, get_data_dir, session_file, trace_file};
