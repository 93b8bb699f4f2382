//! Combine pre-built collection and environment files into one bundle
//!
//! Hand-authored collections may carry fields this tool does not model
//! (saved responses, auth blocks), so everything on this path stays as raw
//! `serde_json::Value` and passes through verbatim aside from the documented
//! wrapping transforms.

use super::{
    report_skipped, timestamp, write_pretty_json, SkippedFile, ENVIRONMENTS_DIR,
};
use crate::errors::Result;
use crate::postman::{self, SCHEMA_URL};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::info;

const WORKSPACE_FILE: &str = "DevRev_Complete_Workspace.postman.json";
const MEGA_FILE: &str = "DevRev_Mega_Collection.postman_collection.json";
const SUMMARY_FILE: &str = "generation-summary.json";
const INSTRUCTIONS_FILE: &str = "IMPORT_INSTRUCTIONS.md";

const COLLECTION_SUFFIX: &str = ".postman_collection.json";
const ENVIRONMENT_SUFFIX: &str = ".postman_environment.json";

/// A loaded environment file, copied through verbatim
struct LoadedEnvironment {
    name: String,
    data: Value,
}

/// Entry point for the `combine` subcommand
pub fn run(collections_dir: &Path, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let mut skipped = Vec::new();
    let collections = load_collections(collections_dir, &mut skipped)?;
    let environments = load_environments(collections_dir, &mut skipped)?;

    let generated_at = timestamp();
    let workspace = create_workspace(&collections, &environments, &generated_at);
    let mega = create_mega_collection(&collections, &generated_at);

    write_pretty_json(&output_dir.join(WORKSPACE_FILE), &workspace)?;
    write_pretty_json(&output_dir.join(MEGA_FILE), &mega)?;

    let env_dir = output_dir.join(ENVIRONMENTS_DIR);
    fs::create_dir_all(&env_dir)?;
    for env in &environments {
        write_pretty_json(
            &env_dir.join(format!("{}{}", env.name, ENVIRONMENT_SUFFIX)),
            &env.data,
        )?;
    }

    fs::write(
        output_dir.join(INSTRUCTIONS_FILE),
        import_instructions(&generated_at),
    )?;

    let total_endpoints = collections
        .iter()
        .map(|c| {
            c.get("item")
                .and_then(Value::as_array)
                .map(|items| postman::count_value_endpoints(items))
                .unwrap_or(0)
        })
        .sum::<usize>();
    let summary = json!({
        "generated_at": generated_at,
        "collections_count": collections.len(),
        "environments_count": environments.len(),
        "total_endpoints": total_endpoints,
        "files_generated": [
            WORKSPACE_FILE,
            MEGA_FILE,
            "environments/",
            INSTRUCTIONS_FILE,
        ],
    });
    write_pretty_json(&output_dir.join(SUMMARY_FILE), &summary)?;

    report_skipped(&skipped);
    info!(
        collections = collections.len(),
        environments = environments.len(),
        endpoints = total_endpoints,
        skipped = skipped.len(),
        "combined collections"
    );
    Ok(())
}

/// Load the first collection file found in each per-API directory;
/// unreadable files are recorded and skipped
fn load_collections(collections_dir: &Path, skipped: &mut Vec<SkippedFile>) -> Result<Vec<Value>> {
    let mut collections = Vec::new();

    for entry in fs::read_dir(collections_dir)? {
        let entry = entry?;
        let dir_path = entry.path();
        let dir_name = entry.file_name().to_string_lossy().into_owned();

        if !dir_path.is_dir() || dir_name == ENVIRONMENTS_DIR {
            continue;
        }

        let collection_file = fs::read_dir(&dir_path)?
            .filter_map(|f| f.ok())
            .map(|f| f.path())
            .find(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(COLLECTION_SUFFIX))
            });

        if let Some(path) = collection_file {
            match read_json(&path) {
                Ok(collection) => collections.push(collection),
                Err(error) => skipped.push(SkippedFile { path, error }),
            }
        }
    }

    Ok(collections)
}

/// Load every environment file under `environments/`, if the directory exists
fn load_environments(
    collections_dir: &Path,
    skipped: &mut Vec<SkippedFile>,
) -> Result<Vec<LoadedEnvironment>> {
    let env_dir = collections_dir.join(ENVIRONMENTS_DIR);
    let mut environments = Vec::new();

    if !env_dir.is_dir() {
        return Ok(environments);
    }

    for entry in fs::read_dir(&env_dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().into_owned();

        if let Some(name) = file_name.strip_suffix(ENVIRONMENT_SUFFIX) {
            match read_json(&path) {
                Ok(data) => environments.push(LoadedEnvironment {
                    name: name.to_string(),
                    data,
                }),
                Err(error) => skipped.push(SkippedFile { path, error }),
            }
        }
    }

    Ok(environments)
}

fn read_json(path: &Path) -> crate::errors::Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn collection_name(collection: &Value) -> String {
    collection
        .pointer("/info/name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Workspace: each collection wrapped as a folder retaining its own events
/// and variables
fn create_workspace(
    collections: &[Value],
    environments: &[LoadedEnvironment],
    generated_at: &str,
) -> Value {
    let collection_list = collections
        .iter()
        .map(|c| format!("- {}", collection_name(c)))
        .collect::<Vec<_>>()
        .join("\n");
    let environment_list = environments
        .iter()
        .map(|e| {
            format!(
                "- {}",
                e.data.get("name").and_then(Value::as_str).unwrap_or(&e.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    json!({
        "info": {
            "_postman_id": postman::new_id(),
            "name": "DevRev API Complete Workspace",
            "description": format!(
                "Complete DevRev API workspace with all collections and environments.\n\n\
                 Generated on: {}\n\n\
                 This workspace includes:\n{}\n\n\
                 Environments:\n{}\n\n\
                 For individual collections and cURL examples, see: https://github.com/devrev/api-collections",
                generated_at, collection_list, environment_list
            ),
            "schema": SCHEMA_URL,
        },
        "item": collections.iter().map(|c| json!({
            "name": collection_name(c),
            "item": c.get("item").cloned().unwrap_or_else(|| json!([])),
            "event": c.get("event").cloned().unwrap_or_else(|| json!([])),
            "variable": c.get("variable").cloned().unwrap_or_else(|| json!([])),
        })).collect::<Vec<_>>(),
        "event": [
            {
                "listen": "prerequest",
                "script": {
                    "type": "text/javascript",
                    "exec": [
                        "// DevRev API Complete Workspace - Pre-request Script",
                        "console.log('DevRev API Request starting...');",
                        "",
                        "// Ensure base_url is set",
                        "if (!pm.environment.get('base_url')) {",
                        "    pm.environment.set('base_url', 'api.devrev.ai');",
                        "}",
                        "",
                        "// Log current environment",
                        "console.log('Base URL:', pm.environment.get('base_url'));",
                        "console.log('Token set:', !!pm.environment.get('aat'));"
                    ]
                }
            },
            {
                "listen": "test",
                "script": {
                    "type": "text/javascript",
                    "exec": [
                        "// DevRev API Complete Workspace - Post-response Script",
                        "console.log('Response received:', pm.response.code, pm.response.status);",
                        "",
                        "// Log response time",
                        "console.log('Response time:', pm.response.responseTime + 'ms');",
                        "",
                        "// Basic error handling",
                        "if (pm.response.code >= 400) {",
                        "    console.error('API Error:', pm.response.text());",
                        "}"
                    ]
                }
            }
        ],
        "variable": [
            { "key": "base_url", "value": super::DEFAULT_HOST, "type": "string" },
            { "key": "workspace_version", "value": "1.0.0", "type": "string" },
            { "key": "generated_at", "value": generated_at, "type": "string" }
        ]
    })
}

/// Mega collection: collection wrappers stripped to name (fixed prefix
/// removed) and item tree; collection events and variables are dropped
fn create_mega_collection(collections: &[Value], generated_at: &str) -> Value {
    let collection_list = collections
        .iter()
        .map(|c| format!("- {}", collection_name(c)))
        .collect::<Vec<_>>()
        .join("\n");

    json!({
        "info": {
            "_postman_id": postman::new_id(),
            "name": "DevRev API - Complete Collection",
            "description": format!(
                "Complete DevRev API collection with all endpoints in a single file.\n\n\
                 Generated on: {}\n\n\
                 This collection includes all DevRev API endpoints organized by category:\n{}\n\n\
                 For better organization, consider importing the workspace file instead.\n\n\
                 Curl examples and individual collections available at: https://github.com/devrev/api-collections",
                generated_at, collection_list
            ),
            "schema": SCHEMA_URL,
            "_exporter_id": "devrev-generator",
        },
        "item": collections.iter().map(|c| {
            let name = collection_name(c);
            json!({
                "name": super::strip_prefix(&name),
                "description": c.pointer("/info/description")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} operations", name)),
                "item": c.get("item").cloned().unwrap_or_else(|| json!([])),
            })
        }).collect::<Vec<_>>(),
        "event": [
            {
                "listen": "prerequest",
                "script": {
                    "type": "text/javascript",
                    "exec": [
                        "// DevRev API Mega Collection - Pre-request Script",
                        "console.log('DevRev API Request starting...');",
                        "",
                        "// Ensure base_url is set",
                        "if (!pm.environment.get('base_url')) {",
                        "    pm.environment.set('base_url', 'api.devrev.ai');",
                        "}",
                        "",
                        "// Validate required environment variables",
                        "const requiredVars = ['aat'];",
                        "const missingVars = requiredVars.filter(v => !pm.environment.get(v));",
                        "",
                        "if (missingVars.length > 0) {",
                        "    console.warn('Missing required environment variables:', missingVars.join(', '));",
                        "    console.warn('Please set these variables in your environment.');",
                        "}"
                    ]
                }
            },
            {
                "listen": "test",
                "script": {
                    "type": "text/javascript",
                    "exec": [
                        "// DevRev API Mega Collection - Post-response Script",
                        "console.log('Response:', pm.response.code, pm.response.status);",
                        "console.log('Response time:', pm.response.responseTime + 'ms');",
                        "",
                        "// Enhanced error handling",
                        "if (pm.response.code >= 400) {",
                        "    console.error('API Error Details:');",
                        "    console.error('Status:', pm.response.code, pm.response.status);",
                        "    console.error('Response:', pm.response.text());",
                        "} else if (pm.response.code >= 200 && pm.response.code < 300) {",
                        "    console.log('Request successful');",
                        "}"
                    ]
                }
            }
        ],
        "variable": [
            { "key": "base_url", "value": super::DEFAULT_HOST, "type": "string" }
        ]
    })
}

/// Fixed prose template for the import instructions document
fn import_instructions(generated_at: &str) -> String {
    format!(
        r#"# DevRev API - Import Instructions

## Generated Files

### Recommended: Complete Workspace
**File:** `{workspace}`
- **Best choice for most users**
- Organized collections in a workspace
- Includes all environments
- Easy to navigate and manage

### Alternative: Mega Collection
**File:** `{mega}`
- Single large collection with all endpoints
- Use if you prefer everything in one collection
- Less organized but complete

### Environments
**Folder:** `environments/`
- Individual environment files
- Import separately or use the workspace (includes them automatically)

## How to Import

### Option 1: Import Workspace (Recommended)
1. Open Postman
2. Click "Import" button
3. Drag & drop `{workspace}`
4. Click "Import"
5. Switch to the "DevRev API Complete Workspace"

### Option 2: Import Mega Collection
1. Open Postman
2. Click "Import" button
3. Drag & drop `{mega}`
4. Import environment files from `environments/` folder separately

## Setup After Import

1. **Set Environment Variables:**
   - Select an environment (Production/Staging/Development)
   - Set your `aat` (DevRev API token)
   - Other variables will be set automatically by requests

2. **Test the Setup:**
   - Run "Get Dev Organization" from Auth collection
   - Verify you get a successful response

3. **Follow Variable Chaining:**
   - Create objects in order: Account -> Part -> Users -> Work Items
   - IDs are automatically captured for subsequent requests

## Additional Resources

- **cURL Examples:** See `collections/` folder for executable curl files
- **Documentation:** Each collection has detailed README.md

## Regeneration

This file was generated automatically. To regenerate with latest changes:

```bash
postforge combine
```

---
Generated on: {generated_at}
"#,
        workspace = WORKSPACE_FILE,
        mega = MEGA_FILE,
        generated_at = generated_at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_collection(name: &str, endpoint_count: usize) -> Value {
        let items: Vec<Value> = (0..endpoint_count)
            .map(|i| json!({"name": format!("req {}", i), "request": {"method": "GET"}}))
            .collect();
        json!({
            "info": {
                "_postman_id": "0",
                "name": name,
                "schema": SCHEMA_URL,
            },
            "item": items,
            "variable": [{"key": "base_url", "value": "api.devrev.ai", "type": "string"}],
        })
    }

    #[test]
    fn test_mega_collection_top_level_names() {
        let collections = vec![
            sample_collection("DevRev - Accounts API", 2),
            sample_collection("DevRev - Works API", 1),
        ];
        let mega = create_mega_collection(&collections, "2026-01-01T00:00:00.000Z");
        let names: Vec<&str> = mega["item"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Accounts API", "Works API"]);
    }

    #[test]
    fn test_workspace_wraps_collections_one_level_deeper() {
        let collections = vec![sample_collection("DevRev - Accounts API", 3)];
        let workspace = create_workspace(&collections, &[], "2026-01-01T00:00:00.000Z");
        let folders = workspace["item"].as_array().unwrap();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0]["name"], "DevRev - Accounts API");
        assert_eq!(folders[0]["item"].as_array().unwrap().len(), 3);
        // Folder keeps the collection's variables
        assert_eq!(folders[0]["variable"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_unreadable_collection_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let good_dir = dir.path().join("accounts");
        fs::create_dir_all(&good_dir).unwrap();
        write_pretty_json(
            &good_dir.join("Accounts.postman_collection.json"),
            &sample_collection("DevRev - Accounts API", 1),
        )
        .unwrap();

        let bad_dir = dir.path().join("works");
        fs::create_dir_all(&bad_dir).unwrap();
        fs::write(bad_dir.join("Works.postman_collection.json"), "{not json").unwrap();

        let mut skipped = Vec::new();
        let collections = load_collections(dir.path(), &mut skipped).unwrap();
        assert_eq!(collections.len(), 1);
        assert_eq!(skipped.len(), 1);
    }
}
