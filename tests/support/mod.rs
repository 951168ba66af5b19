#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

pub fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// The builtin taxonomy document as raw JSON, for tests that mutate it.
pub fn builtin_document() -> Value {
    let path = manifest_dir().join("schema").join("taxonomy.json");
    let data = fs::read_to_string(&path).expect("builtin taxonomy readable");
    serde_json::from_str(&data).expect("builtin taxonomy parses")
}

pub fn write_document(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate taxonomy file")?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.flush()?;
    Ok(file)
}

/// `taxonomy-query` with a clean environment for the override variable.
pub fn taxonomy_query() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_taxonomy-query"));
    cmd.env_remove("CLASSIFIEDS_TAXONOMY");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
