//! Build Postman collections directly from cURL files
//!
//! Walks the collections tree, groups `.curl` files by their containing
//! directory into one collection per directory, then bundles the result as a
//! workspace and a flattened mega collection. Files that fail to parse are
//! recorded and reported at the end; the batch never aborts for one bad file.

use super::{
    report_skipped, timestamp, write_pretty_json, SkippedFile, COLLECTION_PREFIX, DEFAULT_HOST,
    ENVIRONMENTS_DIR,
};
use crate::curl;
use crate::errors::Result;
use crate::postman::{self, Collection, Event, Info, Item, Variable, SCHEMA_URL};
use crate::strings::{capitalize_first, humanize};
use indexmap::IndexMap;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const WORKSPACE_FILE: &str = "DevRev_Complete_Workspace_FromCurl.postman.json";
const MEGA_FILE: &str = "DevRev_Mega_Collection_FromCurl.postman_collection.json";
const SUMMARY_FILE: &str = "curl-generation-summary.json";

/// One discovered `.curl` file
#[derive(Debug)]
struct CurlSource {
    /// Containing directory name, used as the grouping key
    group: String,
    /// File stem, humanized into the request name
    stem: String,
    path: PathBuf,
}

/// Entry point for the `from-curl` subcommand
pub fn run(collections_dir: &Path, output_dir: &Path) -> Result<()> {
    let sources = find_curl_files(collections_dir)?;
    info!(count = sources.len(), "found cURL files");

    let (collections, skipped) = build_collections(&sources);

    fs::create_dir_all(output_dir)?;

    let workspace = create_workspace(&collections);
    let mega = create_mega_collection(&collections);

    write_pretty_json(&output_dir.join(WORKSPACE_FILE), &workspace)?;
    write_pretty_json(&output_dir.join(MEGA_FILE), &mega)?;

    let total_endpoints: usize = collections
        .iter()
        .map(|c| postman::count_endpoints(&c.item))
        .sum();
    let summary = json!({
        "generated_at": timestamp(),
        "source": "cURL files",
        "collections_count": collections.len(),
        "total_endpoints": total_endpoints,
        "files_generated": [WORKSPACE_FILE, MEGA_FILE],
    });
    write_pretty_json(&output_dir.join(SUMMARY_FILE), &summary)?;

    report_skipped(&skipped);
    info!(
        collections = collections.len(),
        endpoints = total_endpoints,
        skipped = skipped.len(),
        "generated collections from cURL files"
    );
    Ok(())
}

/// Discover `.curl` files grouped by their containing directory.
///
/// Iteration follows readdir order; the resulting item order is the
/// enumeration order, which is not guaranteed stable across file systems.
fn find_curl_files(collections_dir: &Path) -> Result<Vec<CurlSource>> {
    let mut sources = Vec::new();

    for entry in fs::read_dir(collections_dir)? {
        let entry = entry?;
        let dir_path = entry.path();
        let dir_name = entry.file_name().to_string_lossy().into_owned();

        if !dir_path.is_dir() || dir_name == ENVIRONMENTS_DIR {
            continue;
        }

        for file in fs::read_dir(&dir_path)? {
            let file = file?;
            let path = file.path();
            if path.extension().and_then(|e| e.to_str()) == Some("curl") {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                sources.push(CurlSource {
                    group: dir_name.clone(),
                    stem,
                    path,
                });
            }
        }
    }

    Ok(sources)
}

/// Parse every source and group the resulting items into one collection per
/// directory, collecting per-file failures instead of aborting
fn build_collections(sources: &[CurlSource]) -> (Vec<Collection>, Vec<SkippedFile>) {
    let mut groups: IndexMap<String, Vec<Item>> = IndexMap::new();
    let mut skipped = Vec::new();

    for source in sources {
        let items = groups.entry(source.group.clone()).or_default();

        let parsed = fs::read_to_string(&source.path)
            .map_err(Into::into)
            .and_then(|content| curl::parse_curl_file(&content));

        match parsed {
            Ok(Some(request)) => {
                items.push(curl::to_item(&request, humanize(&source.stem), &source.path));
            }
            // Files with no command text are skipped quietly
            Ok(None) => {}
            Err(error) => skipped.push(SkippedFile {
                path: source.path.clone(),
                error,
            }),
        }
    }

    let collections = groups
        .into_iter()
        .map(|(group, items)| {
            let name = collection_name(&group);
            Collection {
                info: Info {
                    postman_id: postman::new_id(),
                    name: name.clone(),
                    description: Some(format!("Generated from cURL files in {}/ folder", group)),
                    schema: SCHEMA_URL.to_string(),
                    exporter_id: None,
                },
                item: items,
                event: collection_events(&name),
                variable: vec![Variable::string("base_url", DEFAULT_HOST)],
            }
        })
        .collect();

    (collections, skipped)
}

/// `accounts` -> `DevRev - Accounts API`; hyphens become spaces past the
/// first character
fn collection_name(dir: &str) -> String {
    format!(
        "{}{} API",
        COLLECTION_PREFIX,
        capitalize_first(&dir.replace('-', " "))
    )
}

/// Collection-level console scripts attached to every generated collection
fn collection_events(name: &str) -> Vec<Event> {
    vec![
        Event::prerequest(vec![format!("console.log('{} - Request starting');", name)]),
        Event::test(vec![
            "console.log('Response status:', pm.response.code, pm.response.status);".to_string(),
        ]),
    ]
}

/// Wrap every collection as a named folder, keeping its events and variables
fn create_workspace(collections: &[Collection]) -> Collection {
    Collection {
        info: Info {
            postman_id: postman::new_id(),
            name: "DevRev API Workspace (Generated from cURL)".to_string(),
            description: Some(format!(
                "Complete DevRev API workspace generated from cURL files.\n\n\
                 Generated on: {}\n\n\
                 This workspace includes {} collections with all endpoints converted from cURL commands.\n\n\
                 Source: cURL files in collections/ folders",
                timestamp(),
                collections.len()
            )),
            schema: SCHEMA_URL.to_string(),
            exporter_id: None,
        },
        item: collections
            .iter()
            .map(|c| Item {
                name: c.info.name.clone(),
                event: c.event.clone(),
                request: None,
                item: Some(c.item.clone()),
                variable: c.variable.clone(),
                description: None,
            })
            .collect(),
        event: Vec::new(),
        variable: vec![Variable::string("base_url", DEFAULT_HOST)],
    }
}

/// Flatten collections into folders keeping only names (prefix stripped) and
/// item trees; events and variables are dropped at this level
fn create_mega_collection(collections: &[Collection]) -> Collection {
    Collection {
        info: Info {
            postman_id: postman::new_id(),
            name: "DevRev API - Complete Collection (Generated from cURL)".to_string(),
            description: Some(format!(
                "Complete DevRev API collection generated from cURL files.\n\n\
                 Generated on: {}\n\n\
                 Source: cURL files in collections/ folders",
                timestamp()
            )),
            schema: SCHEMA_URL.to_string(),
            exporter_id: None,
        },
        item: collections
            .iter()
            .map(|c| Item::folder(super::strip_prefix(&c.info.name), c.item.clone()))
            .collect(),
        event: Vec::new(),
        variable: vec![Variable::string("base_url", DEFAULT_HOST)],
    }
}
