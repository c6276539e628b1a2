//! Integration tests for the CLI surface and configuration layering

use super::test_utils::{merge_fixture, write_file};
use clap::Parser;
use std::fs;
use std::sync::Mutex;
use unibin::cli::{Cli, RunContext};
use unibin::config::ConfigLoader;

/// Serializes tests that mutate process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_end_to_end_through_run_context() {
    let (_tmp, a, b, dest) = merge_fixture();

    write_file(&a, "bin/app", b"same");
    write_file(&b, "bin/app", b"same");
    write_file(&a, "lib/only_a.so", b"a");

    let context = RunContext::new(None, None).unwrap();
    let cli = Cli::try_parse_from([
        "unibin",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        dest.to_str().unwrap(),
    ])
    .unwrap();

    let output = context.execute(&cli).unwrap();
    assert!(output.contains("Merge complete"));
    assert_eq!(fs::read(dest.join("bin/app")).unwrap(), b"same");
    assert_eq!(fs::read(dest.join("lib/only_a.so")).unwrap(), b"a");
}

#[test]
fn test_json_output_format() {
    let (_tmp, a, b, dest) = merge_fixture();

    write_file(&a, "data", b"same");
    write_file(&b, "data", b"same");

    let context = RunContext::new(None, None).unwrap();
    let cli = Cli::try_parse_from([
        "unibin",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        dest.to_str().unwrap(),
        "--format",
        "json",
    ])
    .unwrap();

    let output = context.execute(&cli).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["identical_files"], 1);
}

#[test]
fn test_config_file_sets_fuse_tool() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config_file = temp_dir.path().join("unibin.toml");
    fs::write(&config_file, "[fuse]\ntool = \"llvm-lipo\"\n").unwrap();

    let context = RunContext::new(Some(&config_file), None).unwrap();
    assert_eq!(context.config().fuse.tool, "llvm-lipo");
}

#[test]
fn test_env_overrides_file_and_flag_overrides_env() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config_file = temp_dir.path().join("unibin.toml");
    fs::write(&config_file, "[fuse]\ntool = \"from-file\"\n").unwrap();

    std::env::set_var("UNIBIN_FUSE_TOOL", "from-env");
    let from_env = ConfigLoader::load(Some(&config_file)).map(|c| c.fuse.tool);
    let with_flag = RunContext::new(Some(&config_file), Some("from-flag".to_string()))
        .map(|ctx| ctx.config().fuse.tool.clone());
    std::env::remove_var("UNIBIN_FUSE_TOOL");

    assert_eq!(from_env.unwrap(), "from-env");
    assert_eq!(with_flag.unwrap(), "from-flag");
}
