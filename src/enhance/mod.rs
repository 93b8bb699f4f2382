//! Parameter-specification enhancement of existing collections
//!
//! For every API in the static tables, locates its collection file(s),
//! matches request items against the declared operations, and rewrites
//! bodies, query parameters and descriptions with generated example values
//! and documentation. The enhanced collection is written to a sibling file
//! with an `_Enhanced` suffix; the original is never modified in place.
//!
//! Collections are handled as raw JSON values so hand-authored fields this
//! tool does not model survive the round trip.

pub mod tables;

pub use tables::{OperationSpec, Operations, ParamSpec, ParamType, API_SPECIFICATIONS};

use crate::assemble::{report_skipped, SkippedFile, ENVIRONMENTS_DIR};
use crate::errors::{ForgeError, Result};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const COLLECTION_SUFFIX: &str = ".postman_collection.json";
const ENHANCED_SUFFIX: &str = "_Enhanced.postman_collection.json";

/// Entry point for the `enhance` subcommand
pub fn run(collections_dir: &Path) -> Result<()> {
    let mut skipped = Vec::new();

    for (api_name, operations) in API_SPECIFICATIONS.iter() {
        let files = find_collection_files(collections_dir, api_name)?;
        if files.is_empty() {
            // Missing artifact for this API: recorded, not fatal
            skipped.push(SkippedFile {
                path: collections_dir.join(api_name),
                error: ForgeError::NotFound(format!("no collection found for {}", api_name)),
            });
            continue;
        }

        for path in files {
            match enhance_collection_file(&path, operations) {
                Ok(out) => info!(input = %path.display(), output = %out.display(), "enhanced collection"),
                Err(error) => skipped.push(SkippedFile { path, error }),
            }
        }
    }

    report_skipped(&skipped);
    Ok(())
}

/// Locate collection files for an API: a per-API directory whose name or
/// collection file name contains the API name
fn find_collection_files(collections_dir: &Path, api_name: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(collections_dir)? {
        let entry = entry?;
        let dir_path = entry.path();
        let dir_name = entry.file_name().to_string_lossy().into_owned();

        if !dir_path.is_dir() || dir_name == ENVIRONMENTS_DIR {
            continue;
        }

        let matched = fs::read_dir(&dir_path)?
            .filter_map(|f| f.ok())
            .map(|f| f.path())
            .find(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| {
                        n.ends_with(COLLECTION_SUFFIX)
                            && !n.ends_with(ENHANCED_SUFFIX)
                            && (dir_name.contains(api_name)
                                || n.to_lowercase().contains(api_name))
                    })
            });

        if let Some(path) = matched {
            files.push(path);
        }
    }

    Ok(files)
}

/// Enhance one collection file, writing the result beside the original
fn enhance_collection_file(path: &Path, operations: &Operations) -> Result<PathBuf> {
    let text = fs::read_to_string(path)?;
    let mut collection: Value = serde_json::from_str(&text)?;

    if let Some(items) = collection.get_mut("item").and_then(Value::as_array_mut) {
        enhance_items(items, operations);
    }

    // Flag the whole collection as carrying generated specifications
    if let Some(info) = collection.get_mut("info").and_then(Value::as_object_mut) {
        let existing = info
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default();
        info.insert(
            "description".to_string(),
            Value::String(format!(
                "{}\n\n**Enhanced with detailed parameter specifications from DevRev API documentation.**",
                existing
            )),
        );
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ForgeError::Parse("collection path has no file name".to_string()))?;
    let out = path.with_file_name(file_name.replace(COLLECTION_SUFFIX, ENHANCED_SUFFIX));
    crate::assemble::write_pretty_json(&out, &collection)?;
    Ok(out)
}

/// Recursive walk: folders recurse, request leaves get matched and rewritten
fn enhance_items(items: &mut [Value], operations: &Operations) {
    for item in items {
        if let Some(children) = item.get_mut("item").and_then(Value::as_array_mut) {
            enhance_items(children, operations);
        } else if item.get("request").is_some() {
            enhance_request_item(item, operations);
        }
    }
}

/// Match one request item against an API's operations; first hit in
/// declaration order wins
fn match_specification<'a>(item: &Value, operations: &'a Operations) -> Option<&'a OperationSpec> {
    let method = item
        .pointer("/request/method")
        .and_then(Value::as_str)?
        .to_lowercase();
    let url = item
        .pointer("/request/url/raw")
        .and_then(Value::as_str)
        .unwrap_or_default();

    operations
        .values()
        .find(|spec| spec.method.to_lowercase() == method && url.contains(spec.endpoint))
}

fn enhance_request_item(item: &mut Value, operations: &Operations) {
    let Some(spec) = match_specification(item, operations) else {
        return;
    };
    let docs = parameter_docs(&spec.parameters);

    if let Some(request) = item.get_mut("request") {
        if let Some(body) = request.get_mut("body") {
            enhance_body(body, &spec.parameters);
        }
        if let Some(query) = request
            .pointer_mut("/url/query")
            .and_then(Value::as_array_mut)
        {
            enhance_query(query, &spec.parameters);
        }
    }

    if let Some(name) = item.get("name").and_then(Value::as_str) {
        let renamed = format!("{} (Enhanced)", name);
        item["name"] = Value::String(renamed);
    }

    let existing = item
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    item["description"] = Value::String(format!("{}\n\n{}", existing, docs));
}

/// Shallow-merge a generated example object over the existing raw JSON
/// body; generated values win on key collisions
fn enhance_body(body: &mut Value, parameters: &tables::Parameters) {
    if body.get("mode").and_then(Value::as_str) != Some("raw") {
        return;
    }
    let raw = body.get("raw").and_then(Value::as_str).unwrap_or_default();

    let existing: Map<String, Value> = match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => map,
        _ => {
            warn!("could not parse existing body as JSON; body left unchanged");
            return;
        }
    };

    let mut merged = existing;
    for (key, value) in generate_example_body(parameters) {
        merged.insert(key, value);
    }

    let pretty =
        serde_json::to_string_pretty(&Value::Object(merged)).unwrap_or_else(|_| raw.to_string());
    body["raw"] = Value::String(pretty);
    body["options"] = json!({ "raw": { "language": "json" } });
}

/// One example value per declared parameter, keyed by parameter type
fn generate_example_body(parameters: &tables::Parameters) -> Map<String, Value> {
    let mut example = Map::new();

    for (name, param) in parameters {
        let value = match param.kind {
            ParamType::String => {
                if param.format == Some("id") {
                    Value::String(format!("{{{{{}_example}}}}", name))
                } else {
                    Value::String(format!("Example {}", name))
                }
            }
            ParamType::Integer => Value::from(example_minimum(param)),
            ParamType::Boolean => Value::Bool(true),
            ParamType::Array => {
                if param.items == Some("string") {
                    json!(["example1", "example2"])
                } else {
                    json!([])
                }
            }
            ParamType::Enum => Value::String(
                param
                    .allowed_values
                    .first()
                    .copied()
                    .unwrap_or_default()
                    .to_string(),
            ),
            ParamType::Object => json!({}),
        };
        example.insert(name.to_string(), value);
    }

    example
}

/// Declared minimum, except a zero minimum falls back to 1
fn example_minimum(param: &ParamSpec) -> u64 {
    match param.minimum {
        Some(0) | None => 1,
        Some(m) => m,
    }
}

/// Describe existing query parameters and add disabled examples for
/// optional parameters not already present
fn enhance_query(query: &mut Vec<Value>, parameters: &tables::Parameters) {
    for (name, param) in parameters {
        let existing = query
            .iter_mut()
            .find(|q| q.get("key").and_then(Value::as_str) == Some(*name));

        if let Some(entry) = existing {
            entry["description"] = Value::String(format!(
                "{} ({}{})",
                param.description,
                param.kind.as_str(),
                if param.required { ", required" } else { ", optional" }
            ));
        } else if !param.required {
            query.push(json!({
                "key": name,
                "value": example_query_value(param),
                "description": format!("{} ({}, optional)", param.description, param.kind.as_str()),
                "disabled": true,
            }));
        }
    }
}

fn example_query_value(param: &ParamSpec) -> String {
    match param.kind {
        ParamType::String => "example".to_string(),
        ParamType::Integer => example_minimum(param).to_string(),
        ParamType::Boolean => "true".to_string(),
        ParamType::Enum => param
            .allowed_values
            .first()
            .copied()
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

/// Markdown documentation block appended to each enhanced item
fn parameter_docs(parameters: &tables::Parameters) -> String {
    let mut docs = String::from("**Enhanced Parameter Specifications:**\n\n");

    for (name, param) in parameters {
        let required = if param.required {
            "**Required**"
        } else {
            "*Optional*"
        };
        let format = param
            .format
            .map(|f| format!(", format: \"{}\"", f))
            .unwrap_or_default();

        docs.push_str(&format!(
            "- `{}` ({}{}, {}){} - {}\n",
            name,
            param.kind.as_str(),
            format,
            required,
            constraint_text(param),
            param.description
        ));

        if !param.allowed_values.is_empty() {
            docs.push_str(&format!(
                "  - Allowed values: {}\n",
                param
                    .allowed_values
                    .iter()
                    .map(|v| format!("\"{}\"", v))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
    }

    docs
}

fn constraint_text(param: &ParamSpec) -> String {
    let mut constraints = Vec::new();
    if let Some(min) = param.minimum {
        constraints.push(format!(">= {}", min));
    }
    if let Some(max) = param.maximum {
        constraints.push(format!("<= {}", max));
    }
    if constraints.is_empty() {
        String::new()
    } else {
        format!(", {}", constraints.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn works_operations() -> &'static Operations {
        &API_SPECIFICATIONS["works"]
    }

    fn works_create_item(body_raw: &str) -> Value {
        json!({
            "name": "Create Work",
            "request": {
                "method": "POST",
                "url": { "raw": "https://{{base_url}}/works.create" },
                "body": { "mode": "raw", "raw": body_raw }
            }
        })
    }

    #[test]
    fn test_generated_values_win_in_merge() {
        let mut item = works_create_item(r#"{"title":"x"}"#);
        enhance_request_item(&mut item, works_operations());

        let raw = item.pointer("/request/body/raw").unwrap().as_str().unwrap();
        let merged: Value = serde_json::from_str(raw).unwrap();
        // Generated example replaces the hand-written value
        assert_eq!(merged["title"], "Example title");
        // Enum picks the first allowed value
        assert_eq!(merged["type"], "issue");
        assert_eq!(item["name"], "Create Work (Enhanced)");
    }

    #[test]
    fn test_unparseable_body_left_unchanged() {
        let mut item = works_create_item("not json");
        enhance_request_item(&mut item, works_operations());
        assert_eq!(
            item.pointer("/request/body/raw").unwrap().as_str().unwrap(),
            "not json"
        );
        // Item is still renamed and documented
        assert_eq!(item["name"], "Create Work (Enhanced)");
    }

    #[test]
    fn test_no_match_leaves_item_alone() {
        let mut item = json!({
            "name": "Unrelated",
            "request": {
                "method": "DELETE",
                "url": { "raw": "https://{{base_url}}/parts.delete" }
            }
        });
        enhance_request_item(&mut item, works_operations());
        assert_eq!(item["name"], "Unrelated");
        assert!(item.get("description").is_none());
    }

    #[test]
    fn test_optional_query_params_added_disabled() {
        let mut item = json!({
            "name": "Get Auth Token",
            "request": {
                "method": "GET",
                "url": {
                    "raw": "https://{{base_url}}/auth-tokens.get?id=abc",
                    "query": [ { "key": "id", "value": "abc" } ]
                }
            }
        });
        enhance_request_item(&mut item, &API_SPECIFICATIONS["auth-tokens"]);

        let query = item
            .pointer("/request/url/query")
            .unwrap()
            .as_array()
            .unwrap();
        assert_eq!(query.len(), 2);
        // Existing required param gets a description, no disabled flag
        assert!(query[0]["description"]
            .as_str()
            .unwrap()
            .contains("(string, required)"));
        assert!(query[0].get("disabled").is_none());
        // Absent optional param is appended disabled
        assert_eq!(query[1]["key"], "include_permissions");
        assert_eq!(query[1]["disabled"], true);
        assert_eq!(query[1]["value"], "true");
    }

    #[test]
    fn test_nested_folders_are_walked() {
        let mut items = vec![json!({
            "name": "Folder",
            "item": [ works_create_item(r#"{"title":"x"}"#) ]
        })];
        enhance_items(&mut items, works_operations());
        assert_eq!(
            items[0]["item"][0]["name"],
            "Create Work (Enhanced)"
        );
    }

    #[test]
    fn test_first_matching_operation_wins() {
        // auth-tokens has two operations; a POST to auth-tokens.create must
        // match `create`, not `get`
        let mut item = json!({
            "name": "Create Token",
            "request": {
                "method": "POST",
                "url": { "raw": "https://{{base_url}}/auth-tokens.create" },
                "body": { "mode": "raw", "raw": "{}" }
            }
        });
        enhance_request_item(&mut item, &API_SPECIFICATIONS["auth-tokens"]);
        let raw = item.pointer("/request/body/raw").unwrap().as_str().unwrap();
        let merged: Value = serde_json::from_str(raw).unwrap();
        assert!(merged.get("grant_type").is_some());
        // Zero minimum falls back to 1 for the generated example
        assert_eq!(merged["expires_in"], 1);
    }

    #[test]
    fn test_parameter_docs_format() {
        let docs = parameter_docs(&API_SPECIFICATIONS["auth-tokens"]["create"].parameters);
        assert!(docs.starts_with("**Enhanced Parameter Specifications:**\n\n"));
        assert!(docs.contains(
            "- `expires_in` (integer, *Optional*), >= 0, <= 4294967295 - The expected validity lifetime of the token in number of days"
        ));
        assert!(docs.contains("  - Allowed values: \"urn:devrev:params:oauth:grant-type:token-issue\"\n"));
    }

    #[test]
    fn test_enhanced_file_written_beside_original() {
        let dir = tempfile::tempdir().unwrap();
        let api_dir = dir.path().join("works");
        fs::create_dir_all(&api_dir).unwrap();
        let path = api_dir.join("DevRev_Works_Collection.postman_collection.json");
        let collection = json!({
            "info": {
                "_postman_id": "0",
                "name": "DevRev - Works API",
                "description": "Work items",
                "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
            },
            "item": [ works_create_item(r#"{"title":"x"}"#) ],
            // Fields this tool does not model must survive verbatim
            "auth": { "type": "bearer" }
        });
        crate::assemble::write_pretty_json(&path, &collection).unwrap();

        let out = enhance_collection_file(&path, works_operations()).unwrap();
        assert_eq!(
            out.file_name().unwrap().to_str().unwrap(),
            "DevRev_Works_Collection_Enhanced.postman_collection.json"
        );
        // Original untouched
        let original: Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(original["item"][0]["name"], "Create Work");

        let enhanced: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(enhanced["item"][0]["name"], "Create Work (Enhanced)");
        assert!(enhanced["info"]["description"]
            .as_str()
            .unwrap()
            .ends_with("**Enhanced with detailed parameter specifications from DevRev API documentation.**"));
        assert_eq!(enhanced["auth"]["type"], "bearer");
    }

    #[test]
    fn test_find_collection_files_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let works_dir = dir.path().join("works");
        fs::create_dir_all(&works_dir).unwrap();
        fs::write(
            works_dir.join("DevRev_Works_Collection.postman_collection.json"),
            "{}",
        )
        .unwrap();
        let other_dir = dir.path().join("parts");
        fs::create_dir_all(&other_dir).unwrap();
        fs::write(
            other_dir.join("DevRev_Parts_Collection.postman_collection.json"),
            "{}",
        )
        .unwrap();

        let found = find_collection_files(dir.path(), "works").unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].to_string_lossy().contains("works"));
    }
}
