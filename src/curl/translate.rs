//! Structured request to Postman item translation
//!
//! Turns a [`ParsedCurl`] into a collection item: decomposed URL, typed
//! header array, tagged body, and (for create calls) a synthesized
//! post-response script that chains captured IDs into later requests.

use super::parser::ParsedCurl;
use crate::postman::{Body, Event, Header, Item, QueryParam, Request, UrlObject};
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::path::Path;

/// `$NAME` shell references rewritten to `{{NAME}}` Postman syntax
static SHELL_TO_POSTMAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\w+)").expect("invalid shell-to-postman regex"));

/// `{{...}}` tokens, which are not valid URL grammar and must be masked
/// before strict parsing
static TEMPLATE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[^}]+\}\}").expect("invalid template token regex"));

/// Build a collection item from a parsed curl command.
///
/// `name` is the humanized request name; `source` is the originating file,
/// referenced in the item description.
pub fn to_item(curl: &ParsedCurl, name: String, source: &Path) -> Item {
    let url = decompose_url(&curl.url);

    let header = curl
        .headers
        .iter()
        .map(|(key, value)| Header::text(key.clone(), value.clone()))
        .collect();

    let body = curl.body.as_ref().map(|b| {
        if b.json {
            Body::json(b.raw.clone())
        } else {
            Body::raw(b.raw.clone())
        }
    });

    let event = if curl.method == "POST" && curl.url.contains("create") {
        vec![Event::test(generate_test_script(&curl.url))]
    } else {
        Vec::new()
    };

    let source_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Item {
        name,
        event,
        request: Some(Request {
            method: curl.method.clone(),
            header,
            body,
            url,
            description: None,
        }),
        item: None,
        variable: Vec::new(),
        description: Some(format!("Generated from: {}", source_name)),
    }
}

/// Decompose a raw URL into protocol/host/path/query.
///
/// Known placeholder syntaxes are normalized first (`{{DEVREV_TOKEN}}` ->
/// `{{aat}}`, `$NAME` -> `{{NAME}}`). Template tokens are then masked with a
/// dummy segment so `url::Url` can parse the rest; the emitted fields come
/// from that parse while `raw` keeps the real template text. On parse
/// failure the record degrades to raw URL plus a last-path-segment guess.
pub fn decompose_url(raw_url: &str) -> UrlObject {
    let processed = raw_url.replace("{{DEVREV_TOKEN}}", "{{aat}}");
    let processed = SHELL_TO_POSTMAN_RE
        .replace_all(&processed, "{{$1}}")
        .into_owned();

    let parseable = TEMPLATE_TOKEN_RE.replace_all(&processed, "placeholder");

    match url::Url::parse(&parseable) {
        Ok(parsed) => {
            let host = if processed.contains("{{base_url}}") {
                vec!["{{base_url}}".to_string()]
            } else {
                vec![parsed.host_str().unwrap_or_default().to_string()]
            };

            UrlObject {
                raw: processed.clone(),
                protocol: Some(parsed.scheme().to_string()),
                host,
                path: parsed
                    .path()
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
                query: Some(parse_query(parsed.query().unwrap_or(""))),
            }
        }
        Err(_) => UrlObject {
            raw: processed.clone(),
            protocol: Some("https".to_string()),
            host: vec!["{{base_url}}".to_string()],
            path: vec![processed
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string()],
            query: None,
        },
    }
}

/// Decode a query string into ordered key/value pairs.
///
/// An empty or bare `?` input yields no pairs; a key without `=` gets an
/// empty value; both sides are percent-decoded.
pub fn parse_query(query: &str) -> Vec<QueryParam> {
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.is_empty() {
        return Vec::new();
    }

    query
        .split('&')
        .map(|pair| {
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            };
            QueryParam {
                key: percent_decode_str(key).decode_utf8_lossy().into_owned(),
                value: percent_decode_str(value).decode_utf8_lossy().into_owned(),
                description: None,
                disabled: None,
            }
        })
        .collect()
}

/// Post-response script for create calls: captures well-known resource IDs
/// into environment variables so later requests can reference them.
///
/// Pure template text; nothing here is executed by this tool.
fn generate_test_script(url: &str) -> Vec<String> {
    let mut script = vec![
        "if (pm.response.code === 201 || pm.response.code === 200) {".to_string(),
        "    const response = pm.response.json();".to_string(),
        "    console.log('Request successful');".to_string(),
        "    ".to_string(),
        "    // Auto-capture common IDs for variable chaining".to_string(),
    ];

    if url.contains("accounts.create") {
        script.push(
            "    if (response.account) pm.environment.set('account_id', response.account.id);"
                .to_string(),
        );
    }
    if url.contains("works.create") {
        script.push("    if (response.work) {".to_string());
        script.push("        pm.environment.set('work_id', response.work.id);".to_string());
        script.push("        pm.environment.set('ticket_id', response.work.id);".to_string());
        script.push("    }".to_string());
    }
    if url.contains("users.create") {
        script.push(
            "    if (response.dev_user) pm.environment.set('dev_user_id', response.dev_user.id);"
                .to_string(),
        );
        script.push(
            "    if (response.rev_user) pm.environment.set('rev_user_id', response.rev_user.id);"
                .to_string(),
        );
    }
    if url.contains("auth-tokens.create") {
        script.push(
            "    if (response.access_token) pm.environment.set('aat', response.access_token);"
                .to_string(),
        );
    }

    script.push("} else {".to_string());
    script.push("    console.log('Request failed:', pm.response.text());".to_string());
    script.push("}".to_string());

    script
}
