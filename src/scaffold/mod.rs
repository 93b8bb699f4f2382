//! Collection scaffolding for APIs missing from the tree
//!
//! Pure templating: each catalog entry gets a minimal two-operation
//! collection (create/list), matching `.curl` files, and a README.
//! Re-running silently overwrites existing scaffolds.

pub mod catalog;

pub use catalog::{CatalogEntry, Priority, MISSING_APIS};

use crate::assemble::{DEFAULT_HOST, COLLECTION_PREFIX};
use crate::errors::Result;
use crate::postman::{
    self, Body, Collection, Event, Header, Info, Item, QueryParam, Request, UrlObject, Variable,
    SCHEMA_URL,
};
use crate::strings::pascal_label;
use std::fs;
use std::path::Path;
use tracing::info;

/// Entry point for the `scaffold` subcommand. Returns the number of
/// collections created.
pub fn run(collections_dir: &Path, priority: Priority) -> Result<usize> {
    let entries: Vec<&CatalogEntry> = MISSING_APIS
        .iter()
        .filter(|e| e.priority == priority)
        .collect();

    for entry in &entries {
        scaffold_api(collections_dir, entry)?;
        info!(api = entry.name, "scaffolded collection");
    }

    Ok(entries.len())
}

/// Create the directory structure and all template files for one API
fn scaffold_api(collections_dir: &Path, api: &CatalogEntry) -> Result<()> {
    let dir = collections_dir.join(api.name);
    fs::create_dir_all(dir.join("responses"))?;

    let label = pascal_label(api.name);
    let snake = api.name.replace('-', "_");

    let collection = build_collection(api, &label, &snake);
    crate::assemble::write_pretty_json(
        &dir.join(format!(
            "DevRev_{}_Collection.postman_collection.json",
            label.replace(' ', "_")
        )),
        &collection,
    )?;

    write_curl_file(
        &dir.join(format!("create_{}.curl", snake)),
        &create_curl(api, &label),
    )?;
    write_curl_file(&dir.join(format!("list_{}.curl", snake)), &list_curl(api))?;

    fs::write(dir.join("README.md"), readme(api, &label, &snake))?;

    Ok(())
}

/// Two-operation collection skeleton: create with an ID-capturing test
/// script, and a paged list
fn build_collection(api: &CatalogEntry, label: &str, snake: &str) -> Collection {
    let create_item = Item {
        name: format!("Create {}", label),
        event: vec![Event::test(vec![
            "if (pm.response.code === 201) {".to_string(),
            "    const response = pm.response.json();".to_string(),
            format!("    if (response.{}) {{", snake),
            format!(
                "        pm.environment.set('{}_id', response.{}.id);",
                snake, snake
            ),
            format!(
                "        console.log('{} created with ID:', response.{}.id);",
                label, snake
            ),
            "    }".to_string(),
            "}".to_string(),
        ])],
        request: Some(Request {
            method: "POST".to_string(),
            header: vec![
                Header::text("Authorization", "Bearer {{aat}}"),
                Header::text("Content-Type", "application/json"),
            ],
            body: Some(Body::raw(format!(
                "{{\n  \"display_name\": \"Test {}\",\n  \"description\": \"Test {} created via API\"\n}}",
                label, api.name
            ))),
            url: UrlObject {
                raw: format!("https://{{{{base_url}}}}/{}.create", api.name),
                protocol: Some("https".to_string()),
                host: vec!["{{base_url}}".to_string()],
                path: vec![format!("{}.create", api.name)],
                query: None,
            },
            description: Some(format!("Creates a new {}", api.name)),
        }),
        item: None,
        variable: Vec::new(),
        description: None,
    };

    let list_item = Item {
        name: format!("List {}s", label),
        event: Vec::new(),
        request: Some(Request {
            method: "GET".to_string(),
            header: vec![Header::text("Authorization", "Bearer {{aat}}")],
            body: None,
            url: UrlObject {
                raw: format!("https://{{{{base_url}}}}/{}.list?limit=20", api.name),
                protocol: Some("https".to_string()),
                host: vec!["{{base_url}}".to_string()],
                path: vec![format!("{}.list", api.name)],
                query: Some(vec![QueryParam {
                    key: "limit".to_string(),
                    value: "20".to_string(),
                    description: None,
                    disabled: None,
                }]),
            },
            description: Some(format!("Lists all {}s", api.name)),
        }),
        item: None,
        variable: Vec::new(),
        description: None,
    };

    Collection {
        info: Info {
            postman_id: postman::new_id(),
            name: format!("{}{} API", COLLECTION_PREFIX, label),
            description: Some(format!(
                "Collection for DevRev {} API operations - {}",
                label, api.description
            )),
            schema: SCHEMA_URL.to_string(),
            exporter_id: Some("12345678".to_string()),
        },
        item: vec![create_item, list_item],
        event: Vec::new(),
        variable: vec![Variable::string("base_url", DEFAULT_HOST)],
    }
}

fn create_curl(api: &CatalogEntry, label: &str) -> String {
    format!(
        "#!/bin/bash\n\
         # Create a new {name}\n\
         \n\
         curl -X POST \"https://{host}/{name}.create\" \\\n  \
         -H \"Authorization: Bearer $DEVREV_TOKEN\" \\\n  \
         -H \"Content-Type: application/json\" \\\n  \
         -d '{{\n    \"display_name\": \"Test {label}\",\n    \"description\": \"Test {name} created via API\"\n  }}'\n",
        name = api.name,
        host = DEFAULT_HOST,
        label = label,
    )
}

fn list_curl(api: &CatalogEntry) -> String {
    format!(
        "#!/bin/bash\n\
         # List all {name}s\n\
         \n\
         curl -X GET \"https://{host}/{name}.list?limit=20\" \\\n  \
         -H \"Authorization: Bearer $DEVREV_TOKEN\"\n",
        name = api.name,
        host = DEFAULT_HOST,
    )
}

/// Write a curl file and mark it executable where the platform supports it
fn write_curl_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

fn readme(api: &CatalogEntry, label: &str, snake: &str) -> String {
    format!(
        r#"# DevRev {label} API Collection

## Overview
This collection manages DevRev {label}, which handles {description}.

## Available Operations
- **Create {label}** - Creates a new {name}
- **List {label}s** - Lists all {name}s with filtering

## Environment Variables Used
- `{{{{base_url}}}}` - DevRev API base URL
- `{{{{aat}}}}` - Authentication token

## Environment Variables Set
- `{snake}_id` - Primary {name} ID

## Usage Flow
1. **Create {label}** - Set up new {name}
2. **List {label}s** - View all available {name}s

## Dependencies
- Requires valid authentication token
- May require specific permissions for {name} operations

## Notes
- This collection covers basic {name} operations
- Additional endpoints may be available in the DevRev API
- See the DevRev API reference for complete documentation
"#,
        label = label,
        name = api.name,
        description = api.description,
        snake = snake,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curl;

    fn entry() -> CatalogEntry {
        CatalogEntry {
            name: "ai-agents",
            priority: Priority::High,
            description: "AI agent management and operations",
        }
    }

    #[test]
    fn test_build_collection_shape() {
        let api = entry();
        let collection = build_collection(&api, "Ai Agents", "ai_agents");
        assert_eq!(collection.info.name, "DevRev - Ai Agents API");
        assert_eq!(collection.item.len(), 2);
        assert_eq!(collection.item[0].name, "Create Ai Agents");
        assert_eq!(collection.item[1].name, "List Ai Agentss");

        // Create item captures the new resource ID
        let exec = &collection.item[0].event[0].script.exec;
        assert!(exec.iter().any(|l| l.contains("ai_agents_id")));

        // List item carries the limit query
        let list = collection.item[1].request.as_ref().unwrap();
        let query = list.url.query.as_ref().unwrap();
        assert_eq!(query[0].key, "limit");
        assert_eq!(query[0].value, "20");
    }

    #[test]
    fn test_scaffolded_curl_files_parse_back() {
        // The scaffolder's output must be consumable by the from-curl path
        let api = entry();

        let created = curl::parse_curl_file(&create_curl(&api, "Ai Agents"))
            .unwrap()
            .unwrap();
        assert_eq!(created.method, "POST");
        assert_eq!(created.url, "https://api.devrev.ai/ai-agents.create");
        assert_eq!(created.headers.len(), 2);
        assert!(created.body.unwrap().json);
        assert_eq!(created.variables, vec!["DEVREV_TOKEN"]);

        let listed = curl::parse_curl_file(&list_curl(&api)).unwrap().unwrap();
        assert_eq!(listed.method, "GET");
        assert_eq!(listed.url, "https://api.devrev.ai/ai-agents.list?limit=20");
    }

    #[test]
    fn test_scaffold_api_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        scaffold_api(dir.path(), &entry()).unwrap();

        let api_dir = dir.path().join("ai-agents");
        assert!(api_dir.join("responses").is_dir());
        assert!(api_dir
            .join("DevRev_Ai_Agents_Collection.postman_collection.json")
            .is_file());
        assert!(api_dir.join("create_ai_agents.curl").is_file());
        assert!(api_dir.join("list_ai_agents.curl").is_file());
        assert!(api_dir.join("README.md").is_file());
    }

    #[test]
    fn test_run_filters_by_priority() {
        let dir = tempfile::tempdir().unwrap();
        let count = run(dir.path(), Priority::High).unwrap();
        assert_eq!(
            count,
            MISSING_APIS
                .iter()
                .filter(|e| e.priority == Priority::High)
                .count()
        );
        assert!(dir.path().join("incidents").is_dir());
        // Medium/low entries are untouched
        assert!(!dir.path().join("articles").exists());
    }
}
