//! Common test utilities for postforge integration tests
//!
//! Provides CLI invocation helpers and fixture builders for the
//! collections tree layout the tool operates on.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Result of running the postforge CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CliResponse {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run the postforge binary with the given arguments
pub fn forge(args: &[&str]) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_postforge"));
    cmd.args(args);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().expect("Failed to execute postforge");
    parse_output(output)
}

fn parse_output(output: Output) -> CliResponse {
    CliResponse {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(1),
    }
}

/// A throwaway collections tree plus an output directory
pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(root.path().join("collections")).unwrap();
        Workspace { root }
    }

    pub fn collections_dir(&self) -> PathBuf {
        self.root.path().join("collections")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("dist")
    }

    /// Run a subcommand against this workspace's directories
    pub fn run(&self, subcommand: &str, extra: &[&str]) -> CliResponse {
        let collections = self.collections_dir();
        let output = self.output_dir();
        let mut args = vec![
            subcommand,
            "--collections-dir",
            collections.to_str().unwrap(),
            "--output-dir",
            output.to_str().unwrap(),
        ];
        args.extend_from_slice(extra);
        forge(&args)
    }

    /// Write a `.curl` file into a per-API directory
    pub fn add_curl(&self, api: &str, file_name: &str, content: &str) -> PathBuf {
        let dir = self.collections_dir().join(api);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a collection JSON file into a per-API directory
    pub fn add_collection(&self, api: &str, file_name: &str, collection: &serde_json::Value) -> PathBuf {
        let dir = self.collections_dir().join(api);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        fs::write(&path, serde_json::to_string_pretty(collection).unwrap()).unwrap();
        path
    }

    /// Write an environment JSON file under `environments/`
    pub fn add_environment(&self, name: &str, data: &serde_json::Value) -> PathBuf {
        let dir = self.collections_dir().join("environments");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}.postman_environment.json", name));
        fs::write(&path, serde_json::to_string_pretty(data).unwrap()).unwrap();
        path
    }
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("Invalid JSON in {}: {}", path.display(), e))
}

/// A realistic multi-line cURL command file with comments, line
/// continuations and a shell variable
pub fn create_account_curl() -> &'static str {
    r#"#!/bin/bash
# Create a new account

curl -X POST "https://api.devrev.ai/accounts.create" \
  -H "Authorization: Bearer $DEVREV_TOKEN" \
  -H "Content-Type: application/json" \
  -d '{
    "display_name": "Example Account"
  }'
"#
}

pub fn get_account_curl() -> &'static str {
    r#"#!/bin/bash
# Fetch one account by ID

curl "https://api.devrev.ai/accounts.get?id={{account_id}}" \
  -H "Authorization: Bearer $DEVREV_TOKEN"
"#
}

pub fn list_accounts_curl() -> &'static str {
    r#"#!/bin/bash
# List accounts

curl "https://api.devrev.ai/accounts.list?limit=20" \
  -H "Authorization: Bearer $DEVREV_TOKEN"
"#
}

/// A minimal hand-authored collection in Postman v2.1 shape
pub fn sample_collection(name: &str, item_names: &[&str]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = item_names
        .iter()
        .map(|n| {
            serde_json::json!({
                "name": n,
                "request": {
                    "method": "GET",
                    "url": { "raw": "https://{{base_url}}/example" }
                }
            })
        })
        .collect();
    serde_json::json!({
        "info": {
            "_postman_id": "00000000-0000-0000-0000-000000000000",
            "name": name,
            "description": format!("{} operations", name),
            "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
        },
        "item": items,
        "variable": [
            { "key": "base_url", "value": "api.devrev.ai", "type": "string" }
        ]
    })
}
