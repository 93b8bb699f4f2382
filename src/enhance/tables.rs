//! Static parameter-specification tables
//!
//! Curated from the upstream API documentation. Declaration order matters:
//! the enhancer matches a request against an API's operations in order and
//! the first hit wins, and parameter docs/examples are emitted in table
//! order. `IndexMap` keeps both.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Boolean,
    Array,
    Enum,
    Object,
}

impl ParamType {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Enum => "enum",
            ParamType::Object => "object",
        }
    }
}

/// One parameter's declared shape and constraints
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub kind: ParamType,
    pub required: bool,
    pub format: Option<&'static str>,
    /// Element type for arrays
    pub items: Option<&'static str>,
    pub minimum: Option<u64>,
    pub maximum: Option<u64>,
    pub allowed_values: &'static [&'static str],
    pub description: &'static str,
}

impl Default for ParamSpec {
    fn default() -> Self {
        ParamSpec {
            kind: ParamType::String,
            required: false,
            format: None,
            items: None,
            minimum: None,
            maximum: None,
            allowed_values: &[],
            description: "",
        }
    }
}

/// Parameter name -> declared shape, in documentation order
pub type Parameters = IndexMap<&'static str, ParamSpec>;

/// One API operation's endpoint, method and parameter table
#[derive(Debug, Clone)]
pub struct OperationSpec {
    pub endpoint: &'static str,
    pub method: &'static str,
    pub parameters: Parameters,
}

pub type Operations = IndexMap<&'static str, OperationSpec>;

/// API name -> operation name -> specification
pub static API_SPECIFICATIONS: Lazy<IndexMap<&'static str, Operations>> = Lazy::new(|| {
    let mut apis: IndexMap<&'static str, Operations> = IndexMap::new();

    let mut auth_tokens: Operations = IndexMap::new();
    auth_tokens.insert(
        "create",
        OperationSpec {
            endpoint: "auth-tokens.create",
            method: "POST",
            parameters: IndexMap::from([
                (
                    "act_as",
                    ParamSpec {
                        format: Some("id"),
                        description:
                            "The unique ID of the Dev user or the service account to impersonate",
                        ..Default::default()
                    },
                ),
                (
                    "aud",
                    ParamSpec {
                        kind: ParamType::Array,
                        items: Some("string"),
                        description: "The expected audience values with respect to the token",
                        ..Default::default()
                    },
                ),
                (
                    "client_id",
                    ParamSpec {
                        format: Some("text"),
                        description:
                            "An identifier that represents the application which is requesting the token",
                        ..Default::default()
                    },
                ),
                (
                    "expires_in",
                    ParamSpec {
                        kind: ParamType::Integer,
                        minimum: Some(0),
                        maximum: Some(4294967295),
                        description:
                            "The expected validity lifetime of the token in number of days",
                        ..Default::default()
                    },
                ),
                (
                    "grant_type",
                    ParamSpec {
                        kind: ParamType::Enum,
                        allowed_values: &["urn:devrev:params:oauth:grant-type:token-issue"],
                        description: "Specifies the process of obtaining a token",
                        ..Default::default()
                    },
                ),
                (
                    "display_name",
                    ParamSpec {
                        format: Some("text"),
                        description: "Human-readable name for the token",
                        ..Default::default()
                    },
                ),
                (
                    "scopes",
                    ParamSpec {
                        kind: ParamType::Array,
                        items: Some("string"),
                        description: "Permission scopes for the token",
                        ..Default::default()
                    },
                ),
            ]),
        },
    );
    auth_tokens.insert(
        "get",
        OperationSpec {
            endpoint: "auth-tokens.get",
            method: "GET",
            parameters: IndexMap::from([
                (
                    "id",
                    ParamSpec {
                        required: true,
                        format: Some("id"),
                        description: "The unique identifier of the auth token",
                        ..Default::default()
                    },
                ),
                (
                    "include_permissions",
                    ParamSpec {
                        kind: ParamType::Boolean,
                        description: "Whether to include detailed permissions in the response",
                        ..Default::default()
                    },
                ),
            ]),
        },
    );
    apis.insert("auth-tokens", auth_tokens);

    let mut accounts: Operations = IndexMap::new();
    accounts.insert(
        "create",
        OperationSpec {
            endpoint: "accounts.create",
            method: "POST",
            parameters: IndexMap::from([
                (
                    "display_name",
                    ParamSpec {
                        required: true,
                        format: Some("text"),
                        description: "Name of the account",
                        ..Default::default()
                    },
                ),
                (
                    "artifacts",
                    ParamSpec {
                        kind: ParamType::Array,
                        items: Some("string"),
                        description: "The IDs of the artifacts to associate with the account",
                        ..Default::default()
                    },
                ),
                (
                    "custom_fields",
                    ParamSpec {
                        kind: ParamType::Object,
                        description: "Application-defined custom fields",
                        ..Default::default()
                    },
                ),
                (
                    "custom_schema_spec",
                    ParamSpec {
                        kind: ParamType::Object,
                        description: "Custom schemas described using identifiers",
                        ..Default::default()
                    },
                ),
                (
                    "description",
                    ParamSpec {
                        format: Some("text"),
                        description: "Description of the account",
                        ..Default::default()
                    },
                ),
                (
                    "domains",
                    ParamSpec {
                        kind: ParamType::Array,
                        items: Some("string"),
                        description: "List of company's domain names. Example - ['devrev.ai']",
                        ..Default::default()
                    },
                ),
                (
                    "external_refs",
                    ParamSpec {
                        kind: ParamType::Array,
                        items: Some("string"),
                        description:
                            "External refs are unique identifiers from your customer system of records",
                        ..Default::default()
                    },
                ),
                (
                    "owned_by",
                    ParamSpec {
                        kind: ParamType::Array,
                        items: Some("string"),
                        description: "List of Dev users owning this account",
                        ..Default::default()
                    },
                ),
                (
                    "tags",
                    ParamSpec {
                        kind: ParamType::Array,
                        items: Some("object"),
                        description: "Tags associated with the account",
                        ..Default::default()
                    },
                ),
                (
                    "tier",
                    ParamSpec {
                        format: Some("text"),
                        description: "The tier of the account",
                        ..Default::default()
                    },
                ),
                (
                    "websites",
                    ParamSpec {
                        kind: ParamType::Array,
                        items: Some("string"),
                        description: "List of company websites. Example - ['www.devrev.ai']",
                        ..Default::default()
                    },
                ),
            ]),
        },
    );
    apis.insert("accounts", accounts);

    let mut works: Operations = IndexMap::new();
    works.insert(
        "create",
        OperationSpec {
            endpoint: "works.create",
            method: "POST",
            parameters: IndexMap::from([
                (
                    "title",
                    ParamSpec {
                        required: true,
                        format: Some("text"),
                        description: "Title of the work item",
                        ..Default::default()
                    },
                ),
                (
                    "body",
                    ParamSpec {
                        format: Some("text"),
                        description: "Body/description of the work item",
                        ..Default::default()
                    },
                ),
                (
                    "type",
                    ParamSpec {
                        kind: ParamType::Enum,
                        required: true,
                        allowed_values: &["issue", "ticket", "feature", "task", "bug"],
                        description: "Type of the work item",
                        ..Default::default()
                    },
                ),
                (
                    "priority",
                    ParamSpec {
                        kind: ParamType::Enum,
                        allowed_values: &["p0", "p1", "p2", "p3"],
                        description: "Priority level of the work item",
                        ..Default::default()
                    },
                ),
                (
                    "stage",
                    ParamSpec {
                        kind: ParamType::Object,
                        description: "Current stage of the work item",
                        ..Default::default()
                    },
                ),
                (
                    "applies_to_part",
                    ParamSpec {
                        format: Some("id"),
                        description: "ID of the part this work item applies to",
                        ..Default::default()
                    },
                ),
                (
                    "owned_by",
                    ParamSpec {
                        kind: ParamType::Array,
                        items: Some("string"),
                        description: "List of user IDs who own this work item",
                        ..Default::default()
                    },
                ),
                (
                    "reported_by",
                    ParamSpec {
                        kind: ParamType::Array,
                        items: Some("string"),
                        description: "List of user IDs who reported this work item",
                        ..Default::default()
                    },
                ),
            ]),
        },
    );
    apis.insert("works", works);

    apis
});
