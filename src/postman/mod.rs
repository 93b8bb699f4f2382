//! Postman collection model and shared helpers

pub mod types;

pub use types::{
    Body, BodyOptions, Collection, Event, Header, Info, Item, QueryParam, RawOptions, Request,
    Script, UrlObject, Variable, SCHEMA_URL,
};

use serde_json::Value;

/// Fresh random identifier for a `_postman_id` field
///
/// No uniqueness guarantee beyond v4 randomness; collisions are not checked.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Count leaf request items across an arbitrarily nested item tree
pub fn count_endpoints(items: &[Item]) -> usize {
    let mut total = 0;
    for item in items {
        if item.request.is_some() {
            total += 1;
        } else if let Some(children) = &item.item {
            total += count_endpoints(children);
        }
    }
    total
}

/// Same walk over untyped collection JSON (combine and enhance paths keep
/// hand-authored collections as raw values so no unknown fields are dropped)
pub fn count_value_endpoints(items: &[Value]) -> usize {
    let mut total = 0;
    for item in items {
        if item.get("request").is_some() {
            total += 1;
        } else if let Some(children) = item.get("item").and_then(Value::as_array) {
            total += count_value_endpoints(children);
        }
    }
    total
}
