//! Integration test modules

mod change_detection;
mod config_layering;
mod duplicate_scan;
mod path_search;
mod quick_mode;
mod update_pipeline;
