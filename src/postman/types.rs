//! Serde data types for the Postman Collection Format v2.1.0
//!
//! Only the fields this tool authors are modeled; hand-authored collections
//! that may carry extra fields (saved responses, auth blocks, ...) are
//! handled as raw `serde_json::Value` by the combine and enhance paths so
//! nothing is dropped on the way through.

use serde::{Deserialize, Serialize};

/// Schema URL stamped into every generated `info` block
pub const SCHEMA_URL: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// A collection: metadata plus an ordered tree of items.
///
/// A workspace uses the same shape, one level deeper: its items are whole
/// collections wrapped as folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub info: Info,
    #[serde(default)]
    pub item: Vec<Item>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<Event>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<Variable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    #[serde(rename = "_postman_id")]
    pub postman_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: String,
    #[serde(
        rename = "_exporter_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exporter_id: Option<String>,
}

/// One entry in an item tree: a request leaf (`request` set) or a folder
/// (`item` set). Order within a tree is significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<Item>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<Variable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Item {
    /// A folder wrapping child items
    pub fn folder(name: String, children: Vec<Item>) -> Self {
        Item {
            name,
            event: Vec::new(),
            request: None,
            item: Some(children),
            variable: Vec::new(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    pub url: UrlObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Header {
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            key: key.into(),
            value: value.into(),
            kind: Some("text".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub mode: String,
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BodyOptions>,
}

impl Body {
    /// Raw body tagged as JSON for the client's editor
    pub fn json(raw: impl Into<String>) -> Self {
        Body {
            mode: "raw".to_string(),
            raw: raw.into(),
            options: Some(BodyOptions {
                raw: RawOptions {
                    language: "json".to_string(),
                },
            }),
        }
    }

    /// Raw body with no language tag
    pub fn raw(raw: impl Into<String>) -> Self {
        Body {
            mode: "raw".to_string(),
            raw: raw.into(),
            options: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyOptions {
    pub raw: RawOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOptions {
    pub language: String,
}

/// Decomposed request URL. `raw` is always present; the structured fields
/// are best-effort (a template-heavy URL may only decompose partially).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlObject {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Vec<QueryParam>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub listen: String,
    pub script: Script,
}

impl Event {
    pub fn prerequest(exec: Vec<String>) -> Self {
        Event {
            listen: "prerequest".to_string(),
            script: Script::javascript(exec),
        }
    }

    pub fn test(exec: Vec<String>) -> Self {
        Event {
            listen: "test".to_string(),
            script: Script::javascript(exec),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(rename = "type")]
    pub kind: String,
    pub exec: Vec<String>,
}

impl Script {
    pub fn javascript(exec: Vec<String>) -> Self {
        Script {
            kind: "text/javascript".to_string(),
            exec,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Variable {
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Variable {
            key: key.into(),
            value: value.into(),
            kind: Some("string".to_string()),
        }
    }
}
