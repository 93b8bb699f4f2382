//! Built-in catalog of APIs without a collection in the tree
//!
//! Plain constant data curated from the upstream API reference; read-only at
//! runtime.

use clap::ValueEnum;

/// Scaffolding priority, selectable from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One API waiting for a scaffolded collection
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub priority: Priority,
    pub description: &'static str,
}

pub const MISSING_APIS: &[CatalogEntry] = &[
    // High priority
    CatalogEntry {
        name: "ai-agents",
        priority: Priority::High,
        description: "AI agent management and operations",
    },
    CatalogEntry {
        name: "incidents",
        priority: Priority::High,
        description: "Incident tracking and management",
    },
    CatalogEntry {
        name: "metrics",
        priority: Priority::High,
        description: "Analytics and reporting system",
    },
    CatalogEntry {
        name: "slas",
        priority: Priority::High,
        description: "Service level agreements management",
    },
    CatalogEntry {
        name: "sys-users",
        priority: Priority::High,
        description: "System user management",
    },
    CatalogEntry {
        name: "chats",
        priority: Priority::High,
        description: "Chat and messaging features",
    },
    CatalogEntry {
        name: "meetings",
        priority: Priority::High,
        description: "Meeting management system",
    },
    CatalogEntry {
        name: "schedules",
        priority: Priority::High,
        description: "Time and scheduling management",
    },
    // Medium priority
    CatalogEntry {
        name: "articles",
        priority: Priority::Medium,
        description: "Knowledge base and documentation",
    },
    CatalogEntry {
        name: "compliance",
        priority: Priority::Medium,
        description: "Compliance and audit features",
    },
    CatalogEntry {
        name: "customization",
        priority: Priority::Medium,
        description: "Custom fields and workflows",
    },
    CatalogEntry {
        name: "directory",
        priority: Priority::Medium,
        description: "User directory and lookup",
    },
    CatalogEntry {
        name: "engagements",
        priority: Priority::Medium,
        description: "Customer engagement tracking",
    },
    CatalogEntry {
        name: "links",
        priority: Priority::Medium,
        description: "Link management and tracking",
    },
    CatalogEntry {
        name: "preferences",
        priority: Priority::Medium,
        description: "User and system preferences",
    },
    CatalogEntry {
        name: "question-answers",
        priority: Priority::Medium,
        description: "Q&A management system",
    },
    CatalogEntry {
        name: "recommendations",
        priority: Priority::Medium,
        description: "AI-powered recommendations",
    },
    CatalogEntry {
        name: "surveys",
        priority: Priority::Medium,
        description: "Survey and feedback management",
    },
    // Specialized
    CatalogEntry {
        name: "airdrop",
        priority: Priority::Low,
        description: "File sharing and distribution",
    },
    CatalogEntry {
        name: "atoms",
        priority: Priority::Low,
        description: "Atomic operations and transactions",
    },
    CatalogEntry {
        name: "brands",
        priority: Priority::Low,
        description: "Brand and visual identity management",
    },
    CatalogEntry {
        name: "code-changes",
        priority: Priority::Low,
        description: "Code change tracking",
    },
    CatalogEntry {
        name: "commands",
        priority: Priority::Low,
        description: "Command execution and management",
    },
    CatalogEntry {
        name: "auth-connections",
        priority: Priority::Low,
        description: "External auth integrations",
    },
    CatalogEntry {
        name: "event-sources",
        priority: Priority::Low,
        description: "Event sourcing and streaming",
    },
    CatalogEntry {
        name: "keyrings",
        priority: Priority::Low,
        description: "Security key management",
    },
    CatalogEntry {
        name: "record-templates",
        priority: Priority::Low,
        description: "Template management",
    },
    CatalogEntry {
        name: "snap-ins",
        priority: Priority::Low,
        description: "Plugin/extension management",
    },
    CatalogEntry {
        name: "snap-kit-execution",
        priority: Priority::Low,
        description: "Plugin execution environment",
    },
    CatalogEntry {
        name: "snap-widgets",
        priority: Priority::Low,
        description: "Widget management",
    },
    CatalogEntry {
        name: "subscribers",
        priority: Priority::Low,
        description: "Subscription management",
    },
    CatalogEntry {
        name: "uoms",
        priority: Priority::Low,
        description: "Units of measurement",
    },
    CatalogEntry {
        name: "vistas",
        priority: Priority::Low,
        description: "View and dashboard management",
    },
    CatalogEntry {
        name: "web-crawler-job",
        priority: Priority::Low,
        description: "Web crawling operations",
    },
    CatalogEntry {
        name: "widgets",
        priority: Priority::Low,
        description: "UI widget management",
    },
];
