//! Integration tests for the universal build-tree merger

mod cli_config;
mod test_utils;
