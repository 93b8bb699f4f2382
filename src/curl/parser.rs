//! cURL file parsing
//!
//! Each `.curl` file is a shell script holding exactly one curl invocation,
//! possibly spread over continuation lines and prefixed with comments. The
//! file text is reduced to a single command line, shell-lexed once by a
//! quote-aware tokenizer, and the token list is walked to extract the pieces
//! a Postman request needs. Tokenizing up front keeps quoting and escaping
//! out of the extraction logic entirely.

use crate::errors::{ForgeError, Result};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

/// `$name` and `${name}` shell-style variable references
static SHELL_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{?(\w+)\}?").expect("invalid shell variable regex"));

/// `{{name}}` Postman-style variable references
static POSTMAN_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("invalid postman variable regex"));

/// Structured request descriptor parsed from one curl invocation
#[derive(Debug, Clone)]
pub struct ParsedCurl {
    /// HTTP verb, uppercased; `GET` when no `-X` flag is present
    pub method: String,
    pub url: String,
    /// Headers in flag order
    pub headers: Vec<(String, String)>,
    pub body: Option<CurlBody>,
    /// Referenced placeholder names, first-seen order, deduplicated.
    /// Collected for documentation only; never substituted.
    pub variables: Vec<String>,
}

/// Request body extracted from a `-d`/`--data` flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurlBody {
    pub raw: String,
    /// True when the unescaped content starts with `{` and reparses as
    /// strict JSON
    pub json: bool,
}

/// Reduce a curl file to a structured request.
///
/// Returns `Ok(None)` for files with no command text (only comments or
/// blank lines). Any parse failure is an error for the caller to record;
/// the batch continues with the remaining files.
pub fn parse_curl_file(content: &str) -> Result<Option<ParsedCurl>> {
    let command = flatten_command(content);
    if command.is_empty() {
        return Ok(None);
    }
    parse_curl_command(&command).map(Some)
}

/// Strip comments/shebang/blank lines and join continuations into one line
fn flatten_command(content: &str) -> String {
    let mut parts = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        // Backslash continuations become plain whitespace
        parts.push(trimmed.strip_suffix('\\').unwrap_or(trimmed).trim_end());
    }
    parts.join(" ").trim().to_string()
}

/// Parse a single-line curl command
pub fn parse_curl_command(command: &str) -> Result<ParsedCurl> {
    let tokens = tokenize(command)?;
    let mut parsed = parse_tokens(&tokens)?;
    parsed.variables = collect_variables(command);
    Ok(parsed)
}

/// Tokenize a shell command line, honoring single/double quotes and
/// backslash escapes outside single quotes
fn tokenize(cmd: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escape_next = false;
    let mut quoted = false;

    for c in cmd.chars() {
        if escape_next {
            current.push(c);
            escape_next = false;
            continue;
        }

        match c {
            '\\' if !in_single_quote => {
                escape_next = true;
            }
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
                quoted = true;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
                quoted = true;
            }
            ' ' | '\t' | '\n' if !in_single_quote && !in_double_quote => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            _ => {
                current.push(c);
            }
        }
    }

    if in_single_quote || in_double_quote {
        return Err(ForgeError::Parse(
            "unterminated quote in curl command".to_string(),
        ));
    }

    if !current.is_empty() || quoted {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Short flags that consume the following token
const FLAGS_WITH_ARGS: &[char] = &['H', 'd', 'X', 'u', 'A', 'b', 'c', 'o', 'x', 'm', 'e', 'F'];

/// Walk the token list and extract method, URL, headers and body
fn parse_tokens(tokens: &[String]) -> Result<ParsedCurl> {
    let mut method: Option<String> = None;
    let mut url: Option<String> = None;
    let mut headers: Vec<(String, String)> = Vec::new();
    let mut body: Option<CurlBody> = None;

    let mut i = 0;
    if tokens.first().map(|s| s.to_lowercase()).as_deref() == Some("curl") {
        i = 1;
    }

    while i < tokens.len() {
        let token = &tokens[i];

        if token.starts_with('-') {
            match token.as_str() {
                "-X" | "--request" => {
                    i += 1;
                    if i < tokens.len() {
                        method = Some(tokens[i].to_uppercase());
                    }
                }
                "-H" | "--header" => {
                    i += 1;
                    if i < tokens.len() {
                        // Entries without a colon are silently dropped
                        if let Some((key, value)) = split_header(&tokens[i]) {
                            headers.push((key, value));
                        }
                    }
                }
                "-d" | "--data" => {
                    i += 1;
                    if i < tokens.len() && body.is_none() {
                        // First data flag wins; later ones are ignored
                        body = Some(classify_body(&tokens[i]));
                    }
                }
                opt if opt.starts_with("--") => {
                    // Unknown long flag: assume it consumes a value unless
                    // the next token looks like another flag
                    if i + 1 < tokens.len() && !tokens[i + 1].starts_with('-') {
                        i += 1;
                    }
                }
                opt if opt.len() == 2 => {
                    let flag = opt.chars().nth(1).unwrap_or('_');
                    if FLAGS_WITH_ARGS.contains(&flag) && i + 1 < tokens.len() {
                        i += 1;
                    }
                }
                _ => {}
            }
        } else if url.is_none() {
            url = Some(token.clone());
        }

        i += 1;
    }

    let url = url.ok_or_else(|| ForgeError::Parse("curl command has no URL".to_string()))?;

    Ok(ParsedCurl {
        method: method.unwrap_or_else(|| "GET".to_string()),
        url,
        headers,
        body,
        variables: Vec::new(),
    })
}

/// Split a header token on the first colon
fn split_header(header: &str) -> Option<(String, String)> {
    let colon = header.find(':')?;
    if colon == 0 {
        return None;
    }
    let key = header[..colon].trim().to_string();
    let value = header[colon + 1..].trim().to_string();
    Some((key, value))
}

/// Unescape a data value and decide whether it is JSON-flavored
fn classify_body(data: &str) -> CurlBody {
    let raw = data
        .replace("\\n", "\n")
        .replace("\\\"", "\"")
        .replace("\\'", "'");

    let json = raw.trim_start().starts_with('{')
        && serde_json::from_str::<serde_json::Value>(&raw).is_ok();

    CurlBody { raw, json }
}

/// Collect every `$name`/`${name}`/`{{name}}` reference, deduplicated in
/// first-seen order
fn collect_variables(command: &str) -> Vec<String> {
    let mut vars: IndexSet<String> = IndexSet::new();
    for cap in SHELL_VAR_RE.captures_iter(command) {
        vars.insert(cap[1].to_string());
    }
    for cap in POSTMAN_VAR_RE.captures_iter(command) {
        vars.insert(cap[1].to_string());
    }
    vars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_get() {
        let parsed = parse_curl_command("curl https://example.com/works.list").unwrap();
        assert_eq!(parsed.method, "GET");
        assert_eq!(parsed.url, "https://example.com/works.list");
        assert!(parsed.body.is_none());
    }

    #[test]
    fn test_explicit_method_uppercased() {
        let parsed = parse_curl_command("curl -X post https://example.com").unwrap();
        assert_eq!(parsed.method, "POST");
    }

    #[test]
    fn test_headers_order_preserving() {
        let parsed =
            parse_curl_command(r#"curl -H "A: 1" -H "B: 2" https://example.com"#).unwrap();
        assert_eq!(
            parsed.headers,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_malformed_header_dropped() {
        let parsed =
            parse_curl_command(r#"curl -H "NoColonHere" -H "Ok: yes" https://example.com"#)
                .unwrap();
        assert_eq!(parsed.headers, vec![("Ok".to_string(), "yes".to_string())]);
    }

    #[test]
    fn test_json_body_tagged() {
        let parsed = parse_curl_command(r#"curl -d '{"a":1}' https://example.com"#).unwrap();
        let body = parsed.body.unwrap();
        assert!(body.json);
        let value: serde_json::Value = serde_json::from_str(&body.raw).unwrap();
        assert_eq!(value, serde_json::json!({"a": 1}));
    }

    #[test]
    fn test_plain_body_opaque() {
        let parsed = parse_curl_command("curl -d 'plain text' https://example.com").unwrap();
        let body = parsed.body.unwrap();
        assert!(!body.json);
        assert_eq!(body.raw, "plain text");
    }

    #[test]
    fn test_brace_but_invalid_json_is_opaque() {
        let parsed = parse_curl_command("curl -d '{not json}' https://example.com").unwrap();
        let body = parsed.body.unwrap();
        assert!(!body.json);
        assert_eq!(body.raw, "{not json}");
    }

    #[test]
    fn test_first_data_flag_wins() {
        let parsed =
            parse_curl_command("curl -d 'first' --data 'second' https://example.com").unwrap();
        assert_eq!(parsed.body.unwrap().raw, "first");
    }

    #[test]
    fn test_escaped_body_unescaping() {
        let parsed =
            parse_curl_command(r"curl -d 'line1\nline2' https://example.com").unwrap();
        assert_eq!(parsed.body.unwrap().raw, "line1\nline2");
    }

    #[test]
    fn test_variables_deduplicated_in_order() {
        let parsed = parse_curl_command(
            "curl -H 'Authorization: Bearer $DEVREV_TOKEN' \
             'https://{{base_url}}/works.get?id=$WORK_ID&again=$DEVREV_TOKEN'",
        )
        .unwrap();
        assert_eq!(
            parsed.variables,
            vec!["DEVREV_TOKEN", "WORK_ID", "base_url"]
        );
    }

    #[test]
    fn test_unterminated_quote_is_error() {
        assert!(parse_curl_command("curl -d 'oops https://example.com").is_err());
    }

    #[test]
    fn test_missing_url_is_error() {
        assert!(parse_curl_command("curl -X POST").is_err());
    }

    #[test]
    fn test_file_with_comments_and_continuations() {
        let content = "#!/bin/bash\n# Create a new account\n\ncurl -X POST \"https://api.devrev.ai/accounts.create\" \\\n  -H \"Authorization: Bearer $DEVREV_TOKEN\" \\\n  -H \"Content-Type: application/json\" \\\n  -d '{\n    \"display_name\": \"Test\"\n  }'\n";
        let parsed = parse_curl_file(content).unwrap().unwrap();
        assert_eq!(parsed.method, "POST");
        assert_eq!(parsed.url, "https://api.devrev.ai/accounts.create");
        assert_eq!(parsed.headers.len(), 2);
        assert!(parsed.body.unwrap().json);
        assert_eq!(parsed.variables, vec!["DEVREV_TOKEN"]);
    }

    #[test]
    fn test_empty_file_is_none() {
        assert!(parse_curl_file("# only a comment\n\n").unwrap().is_none());
    }

    #[test]
    fn test_unknown_flags_do_not_eat_url() {
        let parsed = parse_curl_command("curl -s -o out.json https://example.com").unwrap();
        assert_eq!(parsed.url, "https://example.com");
    }
}
